use super::{
    record::{Field, RecordLayout},
    Packer,
};
use crate::{Charset, Error, Value};

/// Number of engine slots
pub(crate) const NUM_ENGINE_TYPES: usize = 9;

/// Number of warp factors with a fuel factor (warp 1 to 9)
pub(crate) const NUM_WARP_FACTORS: usize = 9;

const LAYOUT: RecordLayout = RecordLayout {
    name: "engspec",
    fields: &[
        Field::text(&["NAME"], 20),
        Field::i16(&["COST", "MC"]),
        Field::i16(&["COST", "T"]),
        Field::i16(&["COST", "D"]),
        Field::i16(&["COST", "M"]),
        Field::i16(&["TECH"]),
        Field::i32_array(&["FUELFACTOR"], NUM_WARP_FACTORS),
    ],
    max_records: NUM_ENGINE_TYPES,
};

/// Packer for `ENGSPEC.DAT`, 66 bytes per engine
#[derive(Debug, Default, Clone, Copy)]
pub struct EnginePacker;

impl Packer for EnginePacker {
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

    fn stardrive() -> Vec<u8> {
        let mut out = b"StarDrive 1         ".to_vec();
        for x in [1i16, 5, 1, 0, 1] {
            out.extend_from_slice(&x.to_le_bytes());
        }
        for x in [100i32, 800, 2700, 6400, 12500, 21600, 34300, 51200, 72900] {
            out.extend_from_slice(&x.to_le_bytes());
        }
        out
    }

    #[test]
    fn record_width() {
        assert_eq!(LAYOUT.width(), 66);
    }

    #[test]
    fn unpack_engine() {
        let data = stardrive();
        let cp = CodepageCharset::cp437();
        let value = EnginePacker.unpack(&data, &cp).unwrap();
        let engine = value.get_index(0).unwrap();
        assert_eq!(engine.get("NAME"), Some(&Value::from("StarDrive 1")));
        assert_eq!(engine.get("TECH"), Some(&Value::Integer(1)));
        assert_eq!(engine.get("COST").and_then(|x| x.get("MC")), Some(&Value::Integer(1)));
        assert_eq!(engine.get("COST").and_then(|x| x.get("T")), Some(&Value::Integer(5)));

        let fuel = engine.get("FUELFACTOR").and_then(Value::as_array).unwrap();
        assert_eq!(fuel.len(), 9);
        assert_eq!(fuel[8], Value::Integer(72900));

        assert_eq!(EnginePacker.pack(&value, &cp).unwrap(), data);
    }

    #[test]
    fn short_fuel_array_is_zero_filled() {
        let cp = CodepageCharset::cp437();
        let mut engine = Value::new_map();
        engine.insert("FUELFACTOR", vec![Value::Integer(7)]);
        let out = EnginePacker.pack(&Value::Array(vec![engine]), &cp).unwrap();
        assert_eq!(out.len(), 66);
        assert_eq!(&out[30..34], &[7, 0, 0, 0]);
        assert!(out[34..].iter().all(|&x| x == 0));
    }
}
