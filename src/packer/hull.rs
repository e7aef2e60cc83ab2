use super::{
    record::{Field, RecordLayout},
    Packer,
};
use crate::{Charset, Error, Value};

/// Number of hull slots
pub(crate) const NUM_HULLS: usize = 105;

// The hull's cost record is split: minerals come first, money is the last
// field of the record
const LAYOUT: RecordLayout = RecordLayout {
    name: "hullspec",
    fields: &[
        Field::text(&["NAME"], 30),
        Field::i16(&["IMAGE"]),
        Field::i16(&["ZERO"]),
        Field::i16(&["COST", "T"]),
        Field::i16(&["COST", "D"]),
        Field::i16(&["COST", "M"]),
        Field::i16(&["FUEL"]),
        Field::i16(&["CREW"]),
        Field::i16(&["ENGINES"]),
        Field::i16(&["MASS"]),
        Field::i16(&["TECH"]),
        Field::i16(&["CARGO"]),
        Field::i16(&["FIGHTERBAYS"]),
        Field::i16(&["LAUNCHERS"]),
        Field::i16(&["BEAMS"]),
        Field::i16(&["COST", "MC"]),
    ],
    max_records: NUM_HULLS,
};

/// Packer for `HULLSPEC.DAT`, 60 bytes per hull
#[derive(Debug, Default, Clone, Copy)]
pub struct HullPacker;

impl Packer for HullPacker {
    fn pack(&self, value: &Value, charset: &dyn Charset) -> Result<Vec<u8>, Error> {
        Ok(LAYOUT.pack(value, charset))
    }

    fn unpack(&self, data: &[u8], charset: &dyn Charset) -> Result<Value, Error> {
        LAYOUT.unpack(data, charset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodepageCharset;

    fn outrider() -> Vec<u8> {
        let mut out = b"OUTRIDER CLASS SCOUT          ".to_vec();
        for x in [9i16, 1, 40, 20, 5, 260, 180, 1, 75, 1, 40, 0, 0, 1, 50] {
            out.extend_from_slice(&x.to_le_bytes());
        }
        out
    }

    #[test]
    fn record_width() {
        assert_eq!(LAYOUT.width(), 60);
    }

    #[test]
    fn unpack_hull() {
        let data = outrider();
        let cp = CodepageCharset::cp437();
        let value = HullPacker.unpack(&data, &cp).unwrap();
        let hull = value.get_index(0).unwrap();
        assert_eq!(hull.get("NAME"), Some(&Value::from("OUTRIDER CLASS SCOUT")));
        assert_eq!(hull.get("IMAGE"), Some(&Value::Integer(9)));
        assert_eq!(hull.get("FUEL"), Some(&Value::Integer(260)));
        assert_eq!(hull.get("CREW"), Some(&Value::Integer(180)));
        assert_eq!(hull.get("MASS"), Some(&Value::Integer(75)));
        assert_eq!(hull.get("CARGO"), Some(&Value::Integer(40)));
        assert_eq!(hull.get("BEAMS"), Some(&Value::Integer(1)));

        let cost = hull.get("COST").unwrap();
        assert_eq!(cost.get("T"), Some(&Value::Integer(40)));
        assert_eq!(cost.get("D"), Some(&Value::Integer(20)));
        assert_eq!(cost.get("M"), Some(&Value::Integer(5)));
        assert_eq!(cost.get("MC"), Some(&Value::Integer(50)));

        assert_eq!(HullPacker.pack(&value, &cp).unwrap(), data);
    }

    #[test]
    fn pack_writes_every_element() {
        let cp = CodepageCharset::cp437();
        let hulls = Value::Array(vec![Value::new_map(); NUM_HULLS + 2]);
        let out = HullPacker.pack(&hulls, &cp).unwrap();
        assert_eq!(out.len(), (NUM_HULLS + 2) * 60);
    }
}
