use crate::{Error, ErrorKind};

/// Splits off the first `N` bytes as an array
#[inline]
pub(crate) fn get_split<const N: usize>(data: &[u8]) -> Option<([u8; N], &[u8])> {
    let (head, rest) = data.split_first_chunk::<N>()?;
    Some((*head, rest))
}

#[inline]
pub(crate) fn le_i16(data: &[u8]) -> i16 {
    i16::from_le_bytes([data[0], data[1]])
}

/// Forward-only cursor over little-endian binary data that reports the
/// offset of a truncated read.
#[derive(Debug, Clone)]
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        ByteReader { data, offset: 0 }
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if self.data.len() < len {
            return Err(Error::new(ErrorKind::Eof {
                offset: self.offset,
                needed: len - self.data.len(),
            }));
        }

        let (head, rest) = self.data.split_at(len);
        self.data = rest;
        self.offset += len;
        Ok(head)
    }

    #[inline]
    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        match get_split::<N>(self.data) {
            Some((head, rest)) => {
                self.data = rest;
                self.offset += N;
                Ok(head)
            }
            None => Err(Error::new(ErrorKind::Eof {
                offset: self.offset,
                needed: N - self.data.len(),
            })),
        }
    }

    #[inline]
    pub(crate) fn read_i16(&mut self) -> Result<i16, Error> {
        self.read_array::<2>().map(i16::from_le_bytes)
    }

    #[inline]
    pub(crate) fn read_u16(&mut self) -> Result<u16, Error> {
        self.read_array::<2>().map(u16::from_le_bytes)
    }

    #[inline]
    pub(crate) fn read_i32(&mut self) -> Result<i32, Error> {
        self.read_array::<4>().map(i32::from_le_bytes)
    }
}

/// Writes `data` into a field of exactly `width` bytes: longer data is cut,
/// shorter data is padded with spaces
#[inline]
pub(crate) fn write_padded(out: &mut Vec<u8>, data: &[u8], width: usize) {
    let len = data.len().min(width);
    out.extend_from_slice(&data[..len]);
    out.resize(out.len() + (width - len), b' ');
}

/// Strips trailing ascii spaces (and only spaces)
#[inline]
pub(crate) fn trim_trailing_spaces(data: &[u8]) -> &[u8] {
    let end = data
        .iter()
        .rposition(|&x| x != b' ')
        .map_or(0, |pos| pos + 1);
    &data[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(b"Laser               ", b"Laser")]
    #[case(b"   ", b"")]
    #[case(b"", b"")]
    #[case(b" a b ", b" a b")]
    #[case(b"tab\t", b"tab\t")]
    fn test_trim_trailing_spaces(#[case] input: &[u8], #[case] expected: &[u8]) {
        assert_eq!(trim_trailing_spaces(input), expected);
    }

    #[test]
    fn test_write_padded() {
        let mut out = Vec::new();
        write_padded(&mut out, b"abc", 5);
        write_padded(&mut out, b"abcdef", 4);
        assert_eq!(&out, b"abc  abcd");
    }

    #[test]
    fn test_reader_eof_offset() {
        let mut reader = ByteReader::new(&[1, 0, 2]);
        assert_eq!(reader.read_i16().unwrap(), 1);
        assert_eq!(reader.remaining(), 1);
        let err = reader.read_i16().unwrap_err();
        assert_eq!(err.offset(), Some(2));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_le_i16() {
        assert_eq!(le_i16(&[0xff, 0xff]), -1);
        assert_eq!(le_i16(&[0x20, 0x20]), 0x2020);
    }
}
