//! Entry points that select a packer, data type, and character set by name.
//!
//! This is the interface a request handler uses: every option arrives as a
//! string and every failure comes back as an [`Error`].
//!
//! ```
//! use c2format::{format, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = format::pack("string", &Value::from("\u{2265}"), None, None)?;
//! assert_eq!(data, vec![0xf2]);
//!
//! let json = format::unpack("truehull", &[], Some("json"), Some("latin1"))?;
//! assert!(json.as_text().unwrap().starts_with("[[0,0,"));
//! # Ok(())
//! # }
//! ```

use crate::{
    BeamPacker, CharsetKind, EnginePacker, Error, ErrorKind, HullPacker, Packer, SimPacker,
    StringPacker, TorpedoPacker, TruehullPacker, Value,
};
use std::str::FromStr;
use tracing::debug;

/// The file formats that can be packed and unpacked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// Plain text
    String,

    /// `ENGSPEC.DAT`
    EngSpec,

    /// `TORPSPEC.DAT`
    TorpSpec,

    /// `BEAMSPEC.DAT`
    BeamSpec,

    /// `HULLSPEC.DAT`
    HullSpec,

    /// `TRUEHULL.DAT`
    Truehull,

    /// Battle simulation (`.ccb`)
    Sim,
}

const FILE_TYPES: [(&str, FileType); 7] = [
    ("string", FileType::String),
    ("engspec", FileType::EngSpec),
    ("torpspec", FileType::TorpSpec),
    ("beamspec", FileType::BeamSpec),
    ("hullspec", FileType::HullSpec),
    ("truehull", FileType::Truehull),
    ("sim", FileType::Sim),
];

impl FileType {
    /// Looks up a file type by name, ignoring case
    pub fn from_name(name: &str) -> Option<FileType> {
        FILE_TYPES
            .iter()
            .find(|(x, _)| x.eq_ignore_ascii_case(name))
            .map(|(_, kind)| *kind)
    }

    /// Returns the name of the file type
    pub fn name(&self) -> &'static str {
        FILE_TYPES
            .iter()
            .find(|(_, kind)| kind == self)
            .map_or("", |(x, _)| *x)
    }

    /// Returns the packer for the file type
    pub fn packer(&self) -> &'static (dyn Packer + Send + Sync) {
        match self {
            FileType::String => &StringPacker,
            FileType::EngSpec => &EnginePacker,
            FileType::TorpSpec => &TorpedoPacker,
            FileType::BeamSpec => &BeamPacker,
            FileType::HullSpec => &HullPacker,
            FileType::Truehull => &TruehullPacker,
            FileType::Sim => &SimPacker,
        }
    }
}

impl FromStr for FileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::from_name(s).ok_or_else(|| Error::new(ErrorKind::InvalidFileType(String::from(s))))
    }
}

/// How the structured side of a conversion is represented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    /// A [`Value`] tree (the default)
    #[default]
    Obj,

    /// A [`Value::Text`] holding the JSON form of the tree
    #[cfg(feature = "json")]
    Json,
}

impl DataType {
    /// Looks up a data type by name, ignoring case
    pub fn from_name(name: &str) -> Option<DataType> {
        if name.eq_ignore_ascii_case("obj") {
            return Some(DataType::Obj);
        }

        #[cfg(feature = "json")]
        if name.eq_ignore_ascii_case("json") {
            return Some(DataType::Json);
        }

        None
    }

    /// Turns the caller's data into the tree a packer consumes
    fn import(&self, data: &Value) -> Result<Value, Error> {
        match self {
            DataType::Obj => Ok(data.clone()),
            #[cfg(feature = "json")]
            DataType::Json => match data {
                Value::Text(json) => Ok(serde_json::from_str(json)?),
                x => Ok(x.clone()),
            },
        }
    }

    /// Turns a packer's tree into what the caller asked for
    fn export(&self, value: Value) -> Result<Value, Error> {
        match self {
            DataType::Obj => Ok(value),
            #[cfg(feature = "json")]
            DataType::Json => Ok(Value::Text(serde_json::to_string(&value)?)),
        }
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::from_name(s).ok_or_else(|| Error::new(ErrorKind::InvalidDataType(String::from(s))))
    }
}

/// Parsed options of one pack or unpack call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub file_type: FileType,
    pub data_type: DataType,
    pub charset: CharsetKind,
}

impl Options {
    /// Parses the options of a call. Data type and charset fall back to
    /// `obj` and `cp437` when not given.
    pub fn parse(
        file_type: &str,
        data_type: Option<&str>,
        charset: Option<&str>,
    ) -> Result<Options, Error> {
        Ok(Options {
            file_type: file_type.parse()?,
            data_type: data_type.map(str::parse::<DataType>).transpose()?.unwrap_or_default(),
            charset: charset.map(str::parse::<CharsetKind>).transpose()?.unwrap_or_default(),
        })
    }

    /// Packs data into a file
    pub fn pack(&self, data: &Value) -> Result<Vec<u8>, Error> {
        debug!(
            file_type = self.file_type.name(),
            data_type = ?self.data_type,
            charset = ?self.charset,
            "pack"
        );

        let charset = self.charset.charset();
        let value = self.data_type.import(data)?;
        let result = self.file_type.packer().pack(&value, &*charset)?;
        debug!(bytes = result.len(), "packed");
        Ok(result)
    }

    /// Unpacks a file
    pub fn unpack(&self, data: &[u8]) -> Result<Value, Error> {
        debug!(
            file_type = self.file_type.name(),
            data_type = ?self.data_type,
            charset = ?self.charset,
            bytes = data.len(),
            "unpack"
        );

        let charset = self.charset.charset();
        let value = self.file_type.packer().unpack(data, &*charset)?;
        self.data_type.export(value)
    }
}

/// Packs `data` into a file of the named type.
///
/// `data_type` is `obj` (default) or `json`; with `json`, `data` is expected
/// to be a text value holding JSON. `charset` defaults to `cp437`.
pub fn pack(
    file_type: &str,
    data: &Value,
    data_type: Option<&str>,
    charset: Option<&str>,
) -> Result<Vec<u8>, Error> {
    Options::parse(file_type, data_type, charset)?.pack(data)
}

/// Unpacks a file of the named type.
///
/// With data type `json` the result is a text value holding JSON.
pub fn unpack(
    file_type: &str,
    data: &[u8],
    data_type: Option<&str>,
    charset: Option<&str>,
) -> Result<Value, Error> {
    Options::parse(file_type, data_type, charset)?.unpack(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("string", FileType::String)]
    #[case("ENGSPEC", FileType::EngSpec)]
    #[case("torpspec", FileType::TorpSpec)]
    #[case("beamspec", FileType::BeamSpec)]
    #[case("HullSpec", FileType::HullSpec)]
    #[case("truehull", FileType::Truehull)]
    #[case("sim", FileType::Sim)]
    fn test_file_type_names(#[case] name: &str, #[case] expected: FileType) {
        assert_eq!(FileType::from_name(name), Some(expected));
        assert!(expected.name().eq_ignore_ascii_case(name));
    }

    #[test]
    fn distinct_option_errors() {
        let err = pack("xyplan", &Value::Null, None, None).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidFileType(x) if x == "xyplan"));

        let err = pack("string", &Value::Null, Some("xml"), None).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidDataType(x) if x == "xml"));

        let err = unpack("string", b"", None, Some("klingon")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidCharset(x) if x == "klingon"));

        assert!(!err.is_malformed());
    }

    #[test]
    fn default_options() {
        let options = Options::parse("sim", None, None).unwrap();
        assert_eq!(options.data_type, DataType::Obj);
        assert_eq!(options.charset, CharsetKind::Cp437);
    }

    #[test]
    fn obj_passes_values_through() {
        let value = unpack("string", b"abc", Some("obj"), None).unwrap();
        assert_eq!(value, Value::from("abc"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_wrapping() {
        let json = unpack("string", b"abc", Some("json"), None).unwrap();
        assert_eq!(json, Value::from(r#""abc""#));
        assert_eq!(pack("string", &json, Some("json"), None).unwrap(), b"abc");
    }

    #[cfg(feature = "json")]
    #[test]
    fn bad_json_fails() {
        let err = pack("beamspec", &Value::from("[{"), Some("json"), None).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Json(_)));
    }
}
