use super::FormatVersion;
use crate::{
    packer::{int_or_zero, read_text},
    util::{write_padded, ByteReader},
    Charset, Error, Value,
};
use std::collections::BTreeMap;

/// Aggressiveness of a ship that will not fight because it has no fuel
pub const AGGRESSIVENESS_NO_FUEL: i32 = -1;

/// Aggressiveness of a ship that attacks everyone
pub const AGGRESSIVENESS_KILL: i32 = 13;

/// Aggressiveness of a passive ship
pub const AGGRESSIVENESS_PASSIVE: i32 = 0;

/// Ship flag: the friendly code is randomized before each fight
pub const FLAG_RANDOM_FCODE: u16 = 0x0001;

/// Ship flags for the commander ability (set, value)
pub const FLAG_COMMANDER_SET: u16 = 0x0010;
pub const FLAG_COMMANDER: u16 = 0x0020;

/// Ship flag: `FLAK.RATING` and `FLAK.COMPENSATION` replace the computed values
pub const FLAG_RATING_OVERRIDE: u16 = 0x0040;

/// Ship flag: the ship is cloaked
pub const FLAG_CLOAKED: u16 = 0x0080;

/// Ship flags for the elusive ability (set, value)
pub const FLAG_ELUSIVE_SET: u16 = 0x0100;
pub const FLAG_ELUSIVE: u16 = 0x0200;

pub(crate) const NAME_LEN: usize = 20;
pub(crate) const FCODE_LEN: usize = 3;

/// A ship of a simulation file.
///
/// Fields that only exist in some versions of the file format are optional.
/// They are `None` after reading a file that does not have them and are
/// left out of the ship's value, so that a zero read from a file can be told
/// apart from a field the file never had.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimShip {
    pub name: String,
    pub damage: i16,
    pub crew: i16,
    pub id: i16,
    pub owner: i16,
    pub image: i16,
    pub hull: i16,
    pub beam_type: i16,
    pub num_beams: i16,

    /// Secondary weapon: 0 = none, 1-10 = torpedo type, 11 = fighters
    pub aux_type: i16,
    pub num_aux: i16,
    pub aux_ammo: i16,
    pub engine: i16,

    /// 0 = passive, 1-12 = primary enemy, 13 = kill, -1 = no fuel. Other
    /// values are kept as read.
    pub aggressiveness: i32,

    /// Mass of a custom ship (hull 0)
    pub mass: i16,
    pub shield: i16,
    pub friendly_code: Option<String>,
    pub flags: Option<u16>,
    pub intercept_id: Option<i16>,
    pub level: Option<i16>,
    pub flak_rating: Option<i32>,
    pub flak_compensation: Option<i16>,
}

impl SimShip {
    pub(crate) fn parse(
        version: FormatVersion,
        reader: &mut ByteReader,
        charset: &dyn Charset,
    ) -> Result<SimShip, Error> {
        let mut ship = SimShip {
            name: read_text(reader.read_bytes(NAME_LEN)?, charset),
            damage: reader.read_i16()?,
            crew: reader.read_i16()?,
            id: reader.read_i16()?,
            owner: reader.read_i16()?,
            image: reader.read_i16()?,
            hull: reader.read_i16()?,
            beam_type: reader.read_i16()?,
            num_beams: reader.read_i16()?,
            aux_type: reader.read_i16()?,
            num_aux: reader.read_i16()?,
            aux_ammo: reader.read_i16()?,
            engine: reader.read_i16()?,
            aggressiveness: version.decode_aggressiveness(reader.read_i16()?),
            mass: reader.read_i16()?,
            shield: reader.read_i16()?,
            ..SimShip::default()
        };

        if version.has_ship_friendly_code() {
            ship.friendly_code = Some(read_text(reader.read_bytes(FCODE_LEN)?, charset));
            ship.flags = Some(reader.read_u16()?);
        }

        if version.has_intercept_id() {
            ship.intercept_id = Some(reader.read_i16()?);
        }

        if version.has_experience() {
            ship.level = Some(reader.read_i16()?);
        }

        if version.has_flak_override() {
            ship.flak_rating = Some(reader.read_i32()?);
            ship.flak_compensation = Some(reader.read_i16()?);
        }

        Ok(ship)
    }

    pub(crate) fn write(&self, version: FormatVersion, out: &mut Vec<u8>, charset: &dyn Charset) {
        let aggressiveness = version.encode_aggressiveness(self.aggressiveness);

        write_padded(out, &charset.encode(&self.name), NAME_LEN);
        for x in [
            self.damage,
            self.crew,
            self.id,
            self.owner,
            self.image,
            self.hull,
            self.beam_type,
            self.num_beams,
            self.aux_type,
            self.num_aux,
            self.aux_ammo,
            self.engine,
            aggressiveness,
            self.mass,
            self.shield,
        ] {
            out.extend_from_slice(&x.to_le_bytes());
        }

        if version.has_ship_friendly_code() {
            let fcode = self.friendly_code.as_deref().unwrap_or_default();
            write_padded(out, &charset.encode(fcode), FCODE_LEN);
            out.extend_from_slice(&self.flags.unwrap_or(0).to_le_bytes());
        }

        if version.has_intercept_id() {
            out.extend_from_slice(&self.intercept_id.unwrap_or(0).to_le_bytes());
        }

        if version.has_experience() {
            out.extend_from_slice(&self.level.unwrap_or(0).to_le_bytes());
        }

        if version.has_flak_override() {
            out.extend_from_slice(&self.flak_rating.unwrap_or(0).to_le_bytes());
            out.extend_from_slice(&self.flak_compensation.unwrap_or(0).to_le_bytes());
        }
    }

    /// Lowest version whose ship record has room for every field that is set
    pub fn required_version(&self) -> FormatVersion {
        if self.flak_rating.is_some() || self.flak_compensation.is_some() {
            FormatVersion::V4
        } else if self.level.is_some() {
            FormatVersion::V3
        } else if self.intercept_id.is_some() {
            FormatVersion::V2
        } else if self.friendly_code.is_some() || self.flags.is_some() {
            FormatVersion::V1
        } else {
            FormatVersion::V0
        }
    }

    /// Lowest version that gives meaning to every flag that is set
    pub fn flags_version(&self) -> FormatVersion {
        let flags = self.flags.unwrap_or(0);
        if flags & (FLAG_CLOAKED | FLAG_ELUSIVE_SET | FLAG_ELUSIVE) != 0 {
            FormatVersion::V5
        } else if flags & FLAG_RATING_OVERRIDE != 0 {
            FormatVersion::V4
        } else if flags & (FLAG_COMMANDER_SET | FLAG_COMMANDER) != 0 {
            FormatVersion::V3
        } else {
            FormatVersion::V0
        }
    }

    /// Reads a ship from a map value. Missing fields are zero, fields that
    /// are not part of any ship record are ignored.
    pub fn from_value(value: &Value) -> SimShip {
        let int = |key: &'static str| int_or_zero(value.get(key), &[key]);
        let opt = |key: &'static str| value.get(key).map(|x| int_or_zero(Some(x), &[key]));

        SimShip {
            name: value
                .get("NAME")
                .and_then(Value::to_text)
                .unwrap_or_default(),
            damage: int("DAMAGE") as i16,
            crew: int("CREW") as i16,
            id: int("ID") as i16,
            owner: int("OWNER") as i16,
            image: int("IMAGE") as i16,
            hull: int("HULL") as i16,
            beam_type: int("BEAM") as i16,
            num_beams: int("BEAM.COUNT") as i16,
            aux_type: int("AUX") as i16,
            num_aux: int("AUX.COUNT") as i16,
            aux_ammo: int("AUX.AMMO") as i16,
            engine: int("ENGINE") as i16,
            aggressiveness: int("AGGRESSIVENESS") as i32,
            mass: int("MASS") as i16,
            shield: int("SHIELD") as i16,
            friendly_code: value
                .get("FCODE")
                .map(|x| x.to_text().unwrap_or_default()),
            flags: opt("FLAGS").map(|x| x as u16),
            intercept_id: opt("INTERCEPTID").map(|x| x as i16),
            level: opt("LEVEL").map(|x| x as i16),
            flak_rating: opt("FLAK.RATING").map(|x| x as i32),
            flak_compensation: opt("FLAK.COMPENSATION").map(|x| x as i16),
        }
    }

    /// Converts the ship into a map value, leaving out absent fields
    pub fn to_value(&self) -> Value {
        let mut map = BTreeMap::new();
        let mut set = |key: &str, value: Value| {
            map.insert(String::from(key), value);
        };

        set("NAME", Value::from(self.name.as_str()));
        set("DAMAGE", self.damage.into());
        set("CREW", self.crew.into());
        set("ID", self.id.into());
        set("OWNER", self.owner.into());
        set("IMAGE", self.image.into());
        set("HULL", self.hull.into());
        set("BEAM", self.beam_type.into());
        set("BEAM.COUNT", self.num_beams.into());
        set("AUX", self.aux_type.into());
        set("AUX.COUNT", self.num_aux.into());
        set("AUX.AMMO", self.aux_ammo.into());
        set("ENGINE", self.engine.into());
        set("AGGRESSIVENESS", self.aggressiveness.into());
        set("MASS", self.mass.into());
        set("SHIELD", self.shield.into());

        if let Some(fcode) = &self.friendly_code {
            set("FCODE", Value::from(fcode.as_str()));
        }
        if let Some(x) = self.flags {
            set("FLAGS", x.into());
        }
        if let Some(x) = self.intercept_id {
            set("INTERCEPTID", x.into());
        }
        if let Some(x) = self.level {
            set("LEVEL", x.into());
        }
        if let Some(x) = self.flak_rating {
            set("FLAK.RATING", x.into());
        }
        if let Some(x) = self.flak_compensation {
            set("FLAK.COMPENSATION", x.into());
        }

        Value::Map(map)
    }
}
