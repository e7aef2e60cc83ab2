use crate::{
    data::{CP437, LATIN1, WINDOWS_1252},
    Error, ErrorKind,
};
use std::borrow::Cow;
use std::str::FromStr;

/// A character set for converting between game file bytes and text
///
/// Used by every packer that stores text. Implementations are expected to be
/// stateless so that a single instance can be shared freely across calls and
/// threads.
pub trait Charset {
    /// Encodes text into bytes. Characters without a representation are
    /// replaced rather than reported.
    fn encode(&self, text: &str) -> Vec<u8>;

    /// Decodes bytes into a utf-8 string -- allocating if necessary
    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str>;
}

impl<T: Charset + ?Sized> Charset for &'_ T {
    fn encode(&self, text: &str) -> Vec<u8> {
        (**self).encode(text)
    }

    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str> {
        (**self).decode(data)
    }
}

impl<T: Charset + ?Sized> Charset for Box<T> {
    fn encode(&self, text: &str) -> Vec<u8> {
        (**self).encode(text)
    }

    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str> {
        (**self).decode(data)
    }
}

/// A single byte code page where every byte maps to exactly one character.
///
/// The lower half of every supported code page is ascii.
///
/// ```
/// use c2format::{Charset, CodepageCharset};
///
/// let cp = CodepageCharset::cp437();
/// assert_eq!(cp.encode("≥5"), vec![0xf2, b'5']);
/// assert_eq!(cp.decode(&[0xf2, b'5']), "≥5");
/// assert_eq!(cp.encode("€"), b"?");
/// ```
#[derive(Debug, Copy, Clone)]
pub struct CodepageCharset {
    table: &'static [char; 256],
}

impl CodepageCharset {
    /// IBM PC code page 437, the character set of the original game files
    pub fn cp437() -> Self {
        CodepageCharset { table: &CP437 }
    }

    /// Windows code page 1252
    pub fn windows1252() -> Self {
        CodepageCharset {
            table: &WINDOWS_1252,
        }
    }

    /// ISO 8859-1
    pub fn latin1() -> Self {
        CodepageCharset { table: &LATIN1 }
    }

    fn encode_char(&self, c: char) -> u8 {
        if c.is_ascii() {
            return c as u8;
        }

        self.table[0x80..]
            .iter()
            .position(|&x| x == c)
            .map_or(b'?', |pos| (pos + 0x80) as u8)
    }
}

impl Default for CodepageCharset {
    fn default() -> Self {
        CodepageCharset::cp437()
    }
}

impl Charset for CodepageCharset {
    fn encode(&self, text: &str) -> Vec<u8> {
        if text.is_ascii() {
            return text.as_bytes().to_vec();
        }

        text.chars().map(|c| self.encode_char(c)).collect()
    }

    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str> {
        match std::str::from_utf8(data) {
            Ok(s) if data.is_ascii() => Cow::Borrowed(s),
            _ => Cow::Owned(data.iter().map(|&b| self.table[usize::from(b)]).collect()),
        }
    }
}

/// Treats game file bytes as utf-8
///
/// ```
/// use c2format::{Charset, Utf8Charset};
///
/// let charset = Utf8Charset::new();
/// assert_eq!(charset.encode("≥"), vec![0xe2, 0x89, 0xa5]);
/// assert_eq!(charset.decode(b"J\xc3\xa5hk\xc3\xa5m\xc3\xa5hkke"), "Jåhkåmåhkke");
/// assert_eq!(charset.decode(b"Joe\xffcheeze"), "Joe\u{fffd}cheeze");
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Utf8Charset;

impl Utf8Charset {
    /// Creates a new utf8 charset
    pub fn new() -> Self {
        Utf8Charset
    }
}

impl Charset for Utf8Charset {
    fn encode(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }

    fn decode<'a>(&self, data: &'a [u8]) -> Cow<'a, str> {
        String::from_utf8_lossy(data)
    }
}

/// The character sets that can be selected by name
///
/// ```
/// use c2format::CharsetKind;
///
/// assert_eq!("CP437".parse::<CharsetKind>().unwrap(), CharsetKind::Cp437);
/// assert_eq!("utf-8".parse::<CharsetKind>().unwrap(), CharsetKind::Utf8);
/// assert!("ebcdic".parse::<CharsetKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharsetKind {
    /// IBM PC code page 437 (the default)
    #[default]
    Cp437,

    /// Windows code page 1252
    Windows1252,

    /// ISO 8859-1
    Latin1,

    /// Unicode in utf-8
    Utf8,
}

impl CharsetKind {
    /// Looks up a character set by one of its names, ignoring case
    pub fn from_name(name: &str) -> Option<CharsetKind> {
        match name.to_ascii_lowercase().as_str() {
            "cp437" | "437" | "ibm437" | "codepage437" => Some(CharsetKind::Cp437),
            "cp1252" | "1252" | "windows-1252" | "windows1252" => Some(CharsetKind::Windows1252),
            "latin1" | "iso-8859-1" | "iso8859-1" => Some(CharsetKind::Latin1),
            "utf8" | "utf-8" => Some(CharsetKind::Utf8),
            _ => None,
        }
    }

    /// Creates the character set
    pub fn charset(&self) -> Box<dyn Charset + Send + Sync> {
        match self {
            CharsetKind::Cp437 => Box::new(CodepageCharset::cp437()),
            CharsetKind::Windows1252 => Box::new(CodepageCharset::windows1252()),
            CharsetKind::Latin1 => Box::new(CodepageCharset::latin1()),
            CharsetKind::Utf8 => Box::new(Utf8Charset::new()),
        }
    }
}

impl FromStr for CharsetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharsetKind::from_name(s)
            .ok_or_else(|| Error::new(ErrorKind::InvalidCharset(String::from(s))))
    }
}
