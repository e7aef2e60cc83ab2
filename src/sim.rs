//! Battle simulation files (`.ccb`).
//!
//! A simulation file is a signature, a count word, a list of ship records,
//! and an optional planet record. The signature selects one of six
//! [`FormatVersion`]s, and the version decides which fields the records carry:
//!
//! ```text
//! V0  "CCsim" 0x1a          ship: 50 bytes   planet: 13 bytes
//! V1  "CCbsim" '0' 0x1a     + friendly code, flags; planet: base details
//! V2  "CCbsim" '1' 0x1a     + intercept id
//! V3  "CCbsim" '2' 0x1a     + experience level (ship and planet)
//! V4  "CCbsim" '3' 0x1a     + flak rating override
//! V5  "CCbsim" '4' 0x1a     same layout as V4, more flags
//! ```
//!
//! The low 15 bits of the count word are the number of ships and the high
//! bit tells if a planet follows.
//!
//! As a [`Value`], a simulation is a map with the `version` it was read
//! from, the `ships` array, and the `planet` (null if there is none).
//! Repacking such a value writes the same version again, so unpacking and
//! packing reproduces the original bytes.
//!
//! ```
//! use c2format::{CodepageCharset, Packer, SimPacker, Value};
//!
//! let cp = CodepageCharset::cp437();
//! let mut ship = Value::new_map();
//! ship.insert("NAME", "Scout");
//! ship.insert("HULL", 1);
//! ship.insert("LEVEL", 2);
//!
//! let mut sim = Value::new_map();
//! sim.insert("ships", vec![ship]);
//!
//! // An experience level needs at least version 3
//! let data = SimPacker.pack(&sim, &cp).unwrap();
//! assert_eq!(&data[..8], b"CCbsim2\x1a");
//!
//! let unpacked = SimPacker.unpack(&data, &cp).unwrap();
//! assert_eq!(unpacked.get("version"), Some(&Value::Integer(3)));
//! assert_eq!(SimPacker.pack(&unpacked, &cp).unwrap(), data);
//! ```

mod planet;
mod ship;
mod version;

pub use self::planet::SimPlanet;
pub use self::ship::*;
pub use self::version::FormatVersion;

use crate::{packer::Packer, util::ByteReader, Charset, Error, Value};
use std::collections::BTreeMap;
use tracing::{trace, warn};

const PLANET_FLAG: u16 = 0x8000;
const MAX_SHIPS: usize = 0x7fff;

/// The contents of a simulation file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimFile {
    pub version: FormatVersion,
    pub ships: Vec<SimShip>,
    pub planet: Option<SimPlanet>,
}

impl SimFile {
    /// Parses a simulation file
    pub fn parse(data: &[u8], charset: &dyn Charset) -> Result<SimFile, Error> {
        let version = FormatVersion::detect(data)?;
        let mut reader = ByteReader::new(data);
        reader.read_bytes(version.signature_len())?;

        let count = reader.read_u16()?;
        let num_ships = usize::from(count & !PLANET_FLAG);
        let has_planet = count & PLANET_FLAG != 0;
        trace!(
            version = version.number(),
            ships = num_ships,
            planet = has_planet,
            "parsing simulation"
        );

        let ships = (0..num_ships)
            .map(|_| SimShip::parse(version, &mut reader, charset))
            .collect::<Result<Vec<_>, _>>()?;

        let planet = if has_planet {
            Some(SimPlanet::parse(version, &mut reader, charset)?)
        } else {
            None
        };

        if reader.remaining() > 0 {
            trace!(bytes = reader.remaining(), "ignoring trailing simulation data");
        }

        Ok(SimFile {
            version,
            ships,
            planet,
        })
    }

    /// Writes the simulation in the format of its `version`
    pub fn write(&self, charset: &dyn Charset) -> Vec<u8> {
        if self.ships.len() > MAX_SHIPS {
            warn!(
                ships = self.ships.len(),
                kept = MAX_SHIPS,
                "too many ships for a simulation file, dropping the rest"
            );
        }
        let ships = &self.ships[..self.ships.len().min(MAX_SHIPS)];
        let planet_size = self
            .planet
            .as_ref()
            .map_or(0, |_| self.version.planet_size());
        let mut out = Vec::with_capacity(
            self.version.signature_len() + 2 + ships.len() * self.version.ship_size() + planet_size,
        );

        self.version.write_signature(&mut out);

        // Guarded by MAX_SHIPS
        let mut count = ships.len() as u16;
        if self.planet.is_some() {
            count |= PLANET_FLAG;
        }
        out.extend_from_slice(&count.to_le_bytes());

        for ship in ships {
            ship.write(self.version, &mut out, charset);
        }

        if let Some(planet) = &self.planet {
            planet.write(self.version, &mut out, charset);
        }

        out
    }

    /// Lowest version able to hold every field of every record
    pub fn required_version(&self) -> FormatVersion {
        let ships = self.ships.iter().map(SimShip::required_version);
        let planet = self.planet.iter().map(SimPlanet::required_version);
        ships.chain(planet).max().unwrap_or(FormatVersion::V0)
    }

    /// Reads a simulation from a map value.
    ///
    /// The version is the `version` entry, raised to whatever the fields
    /// present in the records need. Without a `version` entry, the flags of
    /// the ships are taken into account as well.
    pub fn from_value(value: &Value) -> SimFile {
        let ships: Vec<SimShip> = value
            .get("ships")
            .and_then(Value::as_array)
            .unwrap_or_default()
            .iter()
            .map(SimShip::from_value)
            .collect();

        let planet = value.get("planet").map(SimPlanet::from_value);

        let mut file = SimFile {
            version: FormatVersion::V0,
            ships,
            planet,
        };

        let marker = value
            .get("version")
            .and_then(Value::to_integer)
            .and_then(FormatVersion::from_number);

        file.version = match marker {
            Some(version) => version.max(file.required_version()),
            None => file
                .ships
                .iter()
                .map(SimShip::flags_version)
                .fold(file.required_version(), Ord::max),
        };

        file
    }

    /// Converts the simulation into a map value
    pub fn to_value(&self) -> Value {
        let mut map = BTreeMap::new();
        map.insert(String::from("version"), Value::from(i64::from(self.version.number())));
        map.insert(
            String::from("ships"),
            Value::Array(self.ships.iter().map(SimShip::to_value).collect()),
        );
        map.insert(
            String::from("planet"),
            self.planet
                .as_ref()
                .map_or(Value::Null, SimPlanet::to_value),
        );
        Value::Map(map)
    }
}

/// Packer for battle simulation files
#[derive(Debug, Default, Clone, Copy)]
pub struct SimPacker;

impl Packer for SimPacker {
    fn pack(&self, value: &Value, charset: &dyn Charset) -> Result<Vec<u8>, Error> {
        Ok(SimFile::from_value(value).write(charset))
    }

    fn unpack(&self, data: &[u8], charset: &dyn Charset) -> Result<Value, Error> {
        SimFile::parse(data, charset).map(|file| file.to_value())
    }
}
