use super::{
    record::{Field, RecordLayout},
    Packer,
};
use crate::{Charset, Error, Value};

/// Number of torpedo types, also the starbase storage slots
pub(crate) const NUM_TORPEDO_TYPES: usize = 10;

const LAYOUT: RecordLayout = RecordLayout {
    name: "torpspec",
    fields: &[
        Field::text(&["NAME"], 20),
        Field::i16(&["TORPCOST"]),
        Field::i16(&["TUBECOST", "MC"]),
        Field::i16(&["TUBECOST", "T"]),
        Field::i16(&["TUBECOST", "D"]),
        Field::i16(&["TUBECOST", "M"]),
        Field::i16(&["MASS"]),
        Field::i16(&["TECH"]),
        Field::i16(&["KILL"]),
        Field::i16(&["DAMAGE"]),
    ],
    max_records: NUM_TORPEDO_TYPES,
};

/// Packer for `TORPSPEC.DAT`, 38 bytes per torpedo system
///
/// `TORPCOST` is the price of a single torpedo while `TUBECOST` is the cost
/// record of the launcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct TorpedoPacker;

impl Packer for TorpedoPacker {
    fn pack(&self, value: &Value, charset: &dyn Charset) -> Result<Vec<u8>, Error> {
        Ok(LAYOUT.pack(value, charset))
    }

    fn unpack(&self, data: &[u8], charset: &dyn Charset) -> Result<Value, Error> {
        LAYOUT.unpack(data, charset)
    }
}
