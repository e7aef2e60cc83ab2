use super::Packer;
use crate::{Charset, Error, Value};

/// Packer for a file that is nothing but text, such as a message or a
/// configuration file
///
/// ```
/// use c2format::{CodepageCharset, Packer, StringPacker, Value};
///
/// let cp = CodepageCharset::cp437();
/// assert_eq!(StringPacker.unpack(b"a \xf2 b\n", &cp).unwrap(), Value::from("a \u{2265} b\n"));
/// assert_eq!(StringPacker.pack(&Value::from(12), &cp).unwrap(), b"12");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct StringPacker;

impl Packer for StringPacker {
    fn pack(&self, value: &Value, charset: &dyn Charset) -> Result<Vec<u8>, Error> {
        let text = value.to_text().unwrap_or_default();
        Ok(charset.encode(&text))
    }

    fn unpack(&self, data: &[u8], charset: &dyn Charset) -> Result<Value, Error> {
        Ok(Value::Text(charset.decode(data).into_owned()))
    }
}
