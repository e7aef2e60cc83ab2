use super::{int_or_zero, Packer};
use crate::{util::le_i16, Charset, Error, Value};
use tracing::trace;

/// Number of player slots in `TRUEHULL.DAT`
pub const NUM_PLAYERS: usize = 11;

/// Number of hull slots per player in `TRUEHULL.DAT`
pub const NUM_HULLS_PER_PLAYER: usize = 20;

const FILE_SIZE: usize = NUM_PLAYERS * NUM_HULLS_PER_PLAYER * 2;

/// Packer for `TRUEHULL.DAT`, the assignment of hulls to players
///
/// The value is always an array of [`NUM_PLAYERS`] arrays of
/// [`NUM_HULLS_PER_PLAYER`] hull numbers. Data that is too short to hold the
/// whole table unpacks as all zeroes instead of failing.
///
/// ```
/// use c2format::{CodepageCharset, Packer, TruehullPacker, NUM_PLAYERS};
///
/// let value = TruehullPacker.unpack(&[1, 0], &CodepageCharset::cp437()).unwrap();
/// assert_eq!(value.as_array().unwrap().len(), NUM_PLAYERS);
/// assert_eq!(value.get_index(0).and_then(|x| x.get_index(0)).and_then(|x| x.as_integer()), Some(0));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TruehullPacker;

impl Packer for TruehullPacker {
    fn pack(&self, value: &Value, _charset: &dyn Charset) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(FILE_SIZE);
        for player in 0..NUM_PLAYERS {
            let row = value.get_index(player);
            for slot in 0..NUM_HULLS_PER_PLAYER {
                let cell = row
                    .and_then(|x| x.get_index(slot))
                    .filter(|x| !x.is_null());
                let hull = int_or_zero(cell, &["TRUEHULL"]) as i16;
                out.extend_from_slice(&hull.to_le_bytes());
            }
        }
        Ok(out)
    }

    fn unpack(&self, data: &[u8], _charset: &dyn Charset) -> Result<Value, Error> {
        let rows = if data.len() >= FILE_SIZE {
            data[..FILE_SIZE]
                .chunks_exact(NUM_HULLS_PER_PLAYER * 2)
                .map(|row| {
                    let hulls = row
                        .chunks_exact(2)
                        .map(|x| Value::from(le_i16(x)))
                        .collect();
                    Value::Array(hulls)
                })
                .collect()
        } else {
            trace!(len = data.len(), "truehull data too short, using empty table");
            vec![Value::Array(vec![Value::Integer(0); NUM_HULLS_PER_PLAYER]); NUM_PLAYERS]
        };

        Ok(Value::Array(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodepageCharset;

    #[test]
    fn short_data_unpacks_as_zeroes() {
        let cp = CodepageCharset::cp437();
        let value = TruehullPacker.unpack(&[7u8; FILE_SIZE - 1], &cp).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), NUM_PLAYERS);
        for row in rows {
            let cells = row.as_array().unwrap();
            assert_eq!(cells.len(), NUM_HULLS_PER_PLAYER);
            assert!(cells.iter().all(|x| *x == Value::Integer(0)));
        }

        let packed = TruehullPacker.pack(&value, &cp).unwrap();
        assert_eq!(packed, vec![0u8; FILE_SIZE]);
    }

    #[test]
    fn round_trip() {
        let cp = CodepageCharset::cp437();
        let data: Vec<u8> = (0..FILE_SIZE / 2)
            .flat_map(|i| ((i % 106) as i16).to_le_bytes())
            .collect();
        let value = TruehullPacker.unpack(&data, &cp).unwrap();
        assert_eq!(
            value.get_index(1).and_then(|x| x.get_index(0)),
            Some(&Value::Integer(20))
        );
        assert_eq!(TruehullPacker.pack(&value, &cp).unwrap(), data);
    }

    #[test]
    fn extra_data_is_ignored() {
        let cp = CodepageCharset::cp437();
        let mut data = vec![0u8; FILE_SIZE];
        data[0] = 15;
        data.extend_from_slice(b"trailer");
        let value = TruehullPacker.unpack(&data, &cp).unwrap();
        assert_eq!(value.get_index(0).and_then(|x| x.get_index(0)), Some(&Value::Integer(15)));
        assert_eq!(TruehullPacker.pack(&value, &cp).unwrap().len(), FILE_SIZE);
    }

    #[test]
    fn pack_incomplete_table() {
        let cp = CodepageCharset::cp437();
        let value = Value::Array(vec![Value::Array(vec![Value::Integer(1), Value::Integer(2)])]);
        let packed = TruehullPacker.pack(&value, &cp).unwrap();
        assert_eq!(packed.len(), FILE_SIZE);
        assert_eq!(&packed[..6], &[1, 0, 2, 0, 0, 0]);
    }
}
