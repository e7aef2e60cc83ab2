use super::{ship::FCODE_LEN, FormatVersion};
use crate::packer::NUM_TORPEDO_TYPES;
use crate::{
    packer::{int_or_zero, read_text},
    util::{write_padded, ByteReader},
    Charset, Error, Value,
};
use std::collections::BTreeMap;

/// The planet (and optional starbase) of a simulation file.
///
/// A starbase is present when `base_beam_tech` is nonzero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimPlanet {
    pub id: i16,
    pub owner: i16,
    pub friendly_code: String,
    pub defense: i16,
    pub base_beam_tech: i16,
    pub base_fighters: i16,
    pub base_defense: Option<i16>,
    pub base_torpedo_tech: Option<i16>,

    /// Starbase torpedo storage by torpedo type
    pub torpedo_storage: Option<[i16; NUM_TORPEDO_TYPES]>,
    pub level: Option<i16>,
}

impl SimPlanet {
    pub(crate) fn parse(
        version: FormatVersion,
        reader: &mut ByteReader,
        charset: &dyn Charset,
    ) -> Result<SimPlanet, Error> {
        let mut planet = SimPlanet {
            id: reader.read_i16()?,
            owner: reader.read_i16()?,
            friendly_code: read_text(reader.read_bytes(FCODE_LEN)?, charset),
            defense: reader.read_i16()?,
            base_beam_tech: reader.read_i16()?,
            base_fighters: reader.read_i16()?,
            ..SimPlanet::default()
        };

        if version.has_base_details() {
            planet.base_defense = Some(reader.read_i16()?);
            planet.base_torpedo_tech = Some(reader.read_i16()?);

            let mut storage = [0i16; NUM_TORPEDO_TYPES];
            for slot in storage.iter_mut() {
                *slot = reader.read_i16()?;
            }
            planet.torpedo_storage = Some(storage);
        }

        if version.has_experience() {
            planet.level = Some(reader.read_i16()?);
        }

        Ok(planet)
    }

    pub(crate) fn write(&self, version: FormatVersion, out: &mut Vec<u8>, charset: &dyn Charset) {
        out.extend_from_slice(&self.id.to_le_bytes());
        out.extend_from_slice(&self.owner.to_le_bytes());
        write_padded(out, &charset.encode(&self.friendly_code), FCODE_LEN);
        out.extend_from_slice(&self.defense.to_le_bytes());
        out.extend_from_slice(&self.base_beam_tech.to_le_bytes());
        out.extend_from_slice(&self.base_fighters.to_le_bytes());

        if version.has_base_details() {
            out.extend_from_slice(&self.base_defense.unwrap_or(0).to_le_bytes());
            out.extend_from_slice(&self.base_torpedo_tech.unwrap_or(0).to_le_bytes());
            for x in self.torpedo_storage.unwrap_or_default() {
                out.extend_from_slice(&x.to_le_bytes());
            }
        }

        if version.has_experience() {
            out.extend_from_slice(&self.level.unwrap_or(0).to_le_bytes());
        }
    }

    /// Lowest version whose planet record has room for every field that is set
    pub fn required_version(&self) -> FormatVersion {
        if self.level.is_some() {
            FormatVersion::V3
        } else if self.base_defense.is_some()
            || self.base_torpedo_tech.is_some()
            || self.torpedo_storage.is_some()
        {
            FormatVersion::V1
        } else {
            FormatVersion::V0
        }
    }

    /// Reads a planet from a map value
    pub fn from_value(value: &Value) -> SimPlanet {
        let int = |key: &'static str| int_or_zero(value.get(key), &[key]) as i16;
        let opt = |key: &'static str| value.get(key).map(|x| int_or_zero(Some(x), &[key]) as i16);

        let torpedo_storage = value.get("STORAGE").map(|storage| {
            let mut result = [0i16; NUM_TORPEDO_TYPES];
            for (i, slot) in result.iter_mut().enumerate() {
                let element = storage.get_index(i).filter(|x| !x.is_null());
                *slot = int_or_zero(element, &["STORAGE"]) as i16;
            }
            result
        });

        SimPlanet {
            id: int("ID"),
            owner: int("OWNER"),
            friendly_code: value
                .get("FCODE")
                .and_then(Value::to_text)
                .unwrap_or_default(),
            defense: int("DEFENSE"),
            base_beam_tech: int("BASE.BEAMTECH"),
            base_fighters: int("BASE.FIGHTERS"),
            base_defense: opt("BASE.DEFENSE"),
            base_torpedo_tech: opt("BASE.TORPTECH"),
            torpedo_storage,
            level: opt("LEVEL"),
        }
    }

    /// Converts the planet into a map value, leaving out absent fields
    pub fn to_value(&self) -> Value {
        let mut map = BTreeMap::new();
        map.insert(String::from("ID"), Value::from(self.id));
        map.insert(String::from("OWNER"), Value::from(self.owner));
        map.insert(String::from("FCODE"), Value::from(self.friendly_code.as_str()));
        map.insert(String::from("DEFENSE"), Value::from(self.defense));
        map.insert(String::from("BASE.BEAMTECH"), Value::from(self.base_beam_tech));
        map.insert(String::from("BASE.FIGHTERS"), Value::from(self.base_fighters));

        if let Some(x) = self.base_defense {
            map.insert(String::from("BASE.DEFENSE"), Value::from(x));
        }
        if let Some(x) = self.base_torpedo_tech {
            map.insert(String::from("BASE.TORPTECH"), Value::from(x));
        }
        if let Some(storage) = self.torpedo_storage {
            let storage = storage.iter().copied().map(Value::from).collect();
            map.insert(String::from("STORAGE"), Value::Array(storage));
        }
        if let Some(x) = self.level {
            map.insert(String::from("LEVEL"), Value::from(x));
        }

        Value::Map(map)
    }
}
