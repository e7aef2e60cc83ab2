use super::AGGRESSIVENESS_NO_FUEL;
use crate::packer::NUM_TORPEDO_TYPES;
use crate::{Error, ErrorKind};
use tracing::trace;

/// Signature of the first generation of simulation files
pub(crate) const SIGNATURE_V0: &[u8; 6] = b"CCsim\x1a";

/// Common prefix of later generations, followed by a version digit and
/// [`SIGNATURE_TRAILER`]
pub(crate) const SIGNATURE_PREFIX: &[u8; 6] = b"CCbsim";
pub(crate) const SIGNATURE_TRAILER: u8 = 0x1a;

/// The generations of the battle simulation file format.
///
/// Each generation appends fields to the ship and planet records of the
/// previous one; none removes a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormatVersion {
    /// `CCsim` files: ships and an optional planet, no friendly codes on ships
    V0,

    /// Adds ship friendly codes and flags, base defense, base torpedo tech,
    /// and torpedo storage
    V1,

    /// Adds ship intercept ids
    V2,

    /// Adds experience levels and commander flags
    V3,

    /// Adds flak rating overrides
    V4,

    /// Adds cloak and elusive flags
    V5,
}

impl FormatVersion {
    /// The newest version this crate reads and writes
    pub const LATEST: FormatVersion = FormatVersion::V5;

    const ALL: [FormatVersion; 6] = [
        FormatVersion::V0,
        FormatVersion::V1,
        FormatVersion::V2,
        FormatVersion::V3,
        FormatVersion::V4,
        FormatVersion::V5,
    ];

    /// Looks up a version by its number (0 to 5)
    ///
    /// ```
    /// use c2format::FormatVersion;
    ///
    /// assert_eq!(FormatVersion::from_number(3), Some(FormatVersion::V3));
    /// assert_eq!(FormatVersion::from_number(6), None);
    /// assert_eq!(FormatVersion::V4.number(), 4);
    /// ```
    pub fn from_number(number: i64) -> Option<FormatVersion> {
        usize::try_from(number)
            .ok()
            .and_then(|x| Self::ALL.get(x))
            .copied()
    }

    /// Returns the version's number
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Length of the signature that starts a file of this version
    pub(crate) fn signature_len(self) -> usize {
        match self {
            FormatVersion::V0 => SIGNATURE_V0.len(),
            _ => SIGNATURE_PREFIX.len() + 2,
        }
    }

    pub(crate) fn write_signature(self, out: &mut Vec<u8>) {
        match self {
            FormatVersion::V0 => out.extend_from_slice(SIGNATURE_V0),
            x => {
                out.extend_from_slice(SIGNATURE_PREFIX);
                out.push(b'0' + x.number() - 1);
                out.push(SIGNATURE_TRAILER);
            }
        }
    }

    /// Identifies the version of a simulation file from its signature
    ///
    /// Data too short to contain a complete signature is reported as
    /// truncated as long as what is there matches a known prefix.
    pub(crate) fn detect(data: &[u8]) -> Result<FormatVersion, Error> {
        if data.starts_with(SIGNATURE_PREFIX) {
            let Some(&[digit, trailer]) = data.get(SIGNATURE_PREFIX.len()..SIGNATURE_PREFIX.len() + 2)
            else {
                return Err(truncated(data, SIGNATURE_PREFIX.len() + 2));
            };

            let version = match digit {
                b'0'..=b'4' => Self::ALL[usize::from(digit - b'0') + 1],
                x => {
                    trace!(version = x, "unrecognized simulation version");
                    return Err(Error::new(ErrorKind::UnsupportedVersion { version: x }));
                }
            };

            if trailer != SIGNATURE_TRAILER {
                return Err(Error::new(ErrorKind::InvalidSignature));
            }

            trace!(version = version.number(), "detected simulation version");
            Ok(version)
        } else if data.starts_with(SIGNATURE_V0) {
            trace!(version = 0, "detected simulation version");
            Ok(FormatVersion::V0)
        } else if SIGNATURE_PREFIX.starts_with(data) || SIGNATURE_V0.starts_with(data) {
            Err(truncated(data, SIGNATURE_V0.len()))
        } else {
            Err(Error::new(ErrorKind::InvalidSignature))
        }
    }

    /// Ship friendly codes and flags are stored
    pub(crate) fn has_ship_friendly_code(self) -> bool {
        self >= FormatVersion::V1
    }

    /// Base defense, torpedo tech, and storage are stored for the planet
    pub(crate) fn has_base_details(self) -> bool {
        self >= FormatVersion::V1
    }

    pub(crate) fn has_intercept_id(self) -> bool {
        self >= FormatVersion::V2
    }

    pub(crate) fn has_experience(self) -> bool {
        self >= FormatVersion::V3
    }

    pub(crate) fn has_flak_override(self) -> bool {
        self >= FormatVersion::V4
    }

    /// On disk value of the "no fuel" aggressiveness
    pub(crate) fn no_fuel_sentinel(self) -> i16 {
        if self >= FormatVersion::V3 {
            -1
        } else {
            255
        }
    }

    /// Converts the on disk aggressiveness word. Before V3 the word is
    /// unsigned and only 255 means "no fuel", so 0xffff stays 65535.
    pub(crate) fn decode_aggressiveness(self, word: i16) -> i32 {
        if word == self.no_fuel_sentinel() {
            AGGRESSIVENESS_NO_FUEL
        } else if self >= FormatVersion::V3 {
            i32::from(word)
        } else {
            i32::from(word as u16)
        }
    }

    /// Inverse of [`decode_aggressiveness`](Self::decode_aggressiveness),
    /// keeping the low 16 bits of anything else
    pub(crate) fn encode_aggressiveness(self, value: i32) -> i16 {
        if value == AGGRESSIVENESS_NO_FUEL {
            self.no_fuel_sentinel()
        } else {
            value as i16
        }
    }

    /// Size of one ship record in bytes
    pub fn ship_size(self) -> usize {
        let mut result = 20 + 15 * 2;
        if self.has_ship_friendly_code() {
            result += 3 + 2;
        }
        if self.has_intercept_id() {
            result += 2;
        }
        if self.has_experience() {
            result += 2;
        }
        if self.has_flak_override() {
            result += 4 + 2;
        }
        result
    }

    /// Size of the planet record in bytes
    pub fn planet_size(self) -> usize {
        let mut result = 2 + 2 + 3 + 3 * 2;
        if self.has_base_details() {
            result += 2 + 2 + NUM_TORPEDO_TYPES * 2;
        }
        if self.has_experience() {
            result += 2;
        }
        result
    }
}

fn truncated(data: &[u8], len: usize) -> Error {
    Error::new(ErrorKind::Eof {
        offset: data.len(),
        needed: len.saturating_sub(data.len()),
    })
}
