//! Codecs converting one game file format to and from a [`Value`].
//!
//! Each file format gets a zero sized packer type. Most of them describe an
//! array of fixed width records with a [`RecordLayout`](record) table and
//! share one implementation of the record marshaling.

mod beam;
mod engine;
mod hull;
mod record;
mod string;
mod torpedo;
mod truehull;

pub use self::beam::BeamPacker;
pub use self::engine::EnginePacker;
pub use self::hull::HullPacker;
pub use self::string::StringPacker;
pub use self::torpedo::TorpedoPacker;
pub use self::truehull::{TruehullPacker, NUM_HULLS_PER_PLAYER, NUM_PLAYERS};

pub(crate) use self::record::{int_or_zero, read_text};
pub(crate) use self::torpedo::NUM_TORPEDO_TYPES;

use crate::{Charset, Error, Value};

/// Converts between a binary file format and its structured value
///
/// Packers carry no state. `pack` tolerates values that have more fields or
/// elements than the format can hold and defaults what is missing, so its
/// only failure mode is input that can not be represented at all. `unpack`
/// rejects structurally invalid data with a malformed input error.
pub trait Packer {
    /// Encodes a value into the file format
    fn pack(&self, value: &Value, charset: &dyn Charset) -> Result<Vec<u8>, Error>;

    /// Decodes file data into a freshly allocated value
    fn unpack(&self, data: &[u8], charset: &dyn Charset) -> Result<Value, Error>;
}

impl<T: Packer + ?Sized> Packer for &'_ T {
    fn pack(&self, value: &Value, charset: &dyn Charset) -> Result<Vec<u8>, Error> {
        (**self).pack(value, charset)
    }

    fn unpack(&self, data: &[u8], charset: &dyn Charset) -> Result<Value, Error> {
        (**self).unpack(data, charset)
    }
}
