use super::{
    record::{Field, RecordLayout},
    Packer,
};
use crate::{Charset, Error, Value};

/// Number of beam weapon slots
pub(crate) const NUM_BEAM_TYPES: usize = 10;

const LAYOUT: RecordLayout = RecordLayout {
    name: "beamspec",
    fields: &[
        Field::text(&["NAME"], 20),
        Field::i16(&["COST", "MC"]),
        Field::i16(&["COST", "T"]),
        Field::i16(&["COST", "D"]),
        Field::i16(&["COST", "M"]),
        Field::i16(&["MASS"]),
        Field::i16(&["TECH"]),
        Field::i16(&["KILL"]),
        Field::i16(&["DAMAGE"]),
    ],
    max_records: NUM_BEAM_TYPES,
};

/// Packer for `BEAMSPEC.DAT`, 36 bytes per beam weapon
///
/// ```
/// use c2format::{BeamPacker, CodepageCharset, Packer};
///
/// let mut data = b"Laser               ".to_vec();
/// data.extend_from_slice(&[1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 10, 0, 3, 0]);
///
/// let value = BeamPacker.unpack(&data, &CodepageCharset::cp437()).unwrap();
/// let laser = value.get_index(0).unwrap();
/// assert_eq!(laser.get("KILL").and_then(|x| x.as_integer()), Some(10));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct BeamPacker;

impl Packer for BeamPacker {
    fn pack(&self, value: &Value, charset: &dyn Charset) -> Result<Vec<u8>, Error> {
        Ok(LAYOUT.pack(value, charset))
    }

    fn unpack(&self, data: &[u8], charset: &dyn Charset) -> Result<Value, Error> {
        LAYOUT.unpack(data, charset)
    }
}
