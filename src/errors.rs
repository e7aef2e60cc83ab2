use std::fmt;

/// An error that can occur when packing or unpacking data
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Returns the byte offset that the error occurs (if available)
    pub fn offset(&self) -> Option<usize> {
        self.0.offset()
    }

    /// Returns true if the error was caused by structurally invalid binary
    /// input (truncation, bad signature, or an unknown file version)
    pub fn is_malformed(&self) -> bool {
        matches!(
            *self.0,
            ErrorKind::Eof { .. } | ErrorKind::InvalidSignature | ErrorKind::UnsupportedVersion { .. }
        )
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// The requested file type is not known
    InvalidFileType(String),

    /// The requested data type is neither `json` nor `obj`
    InvalidDataType(String),

    /// The requested character set is not known
    InvalidCharset(String),

    /// Unexpected end of input
    Eof { offset: usize, needed: usize },

    /// The data does not start with a known file signature
    InvalidSignature,

    /// The signature is known but the version is not
    UnsupportedVersion { version: u8 },

    /// JSON input could not be parsed
    #[cfg(feature = "json")]
    Json(serde_json::Error),
}

impl ErrorKind {
    pub fn offset(&self) -> Option<usize> {
        match *self {
            ErrorKind::Eof { offset, .. } => Some(offset),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self.0 {
            #[cfg(feature = "json")]
            ErrorKind::Json(ref err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::InvalidFileType(ref name) => write!(f, "invalid file type: {}", name),
            ErrorKind::InvalidDataType(ref name) => write!(f, "invalid data type: {}", name),
            ErrorKind::InvalidCharset(ref name) => write!(f, "invalid character set: {}", name),
            ErrorKind::Eof { offset, needed } => write!(
                f,
                "unexpected end of file (offset: {}, missing {} bytes)",
                offset, needed
            ),
            ErrorKind::InvalidSignature => write!(f, "invalid file signature"),
            ErrorKind::UnsupportedVersion { version } => {
                write!(f, "unsupported file version (version byte: {:#04x})", version)
            }
            #[cfg(feature = "json")]
            ErrorKind::Json(ref err) => write!(f, "json error: {}", err),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::new(ErrorKind::Json(error))
    }
}
