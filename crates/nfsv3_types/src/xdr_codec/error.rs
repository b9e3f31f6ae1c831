use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// An error occurred while reading or writing data.
    Io(std::io::Error),

    /// The input ended before the value was complete.
    TruncatedData,

    /// An invalid value was encountered for an enum/bool type.
    InvalidEnumValue(u32),

    /// A length did not match what the type requires.
    InvalidLength(usize),

    /// The object is too large to be described by a 32-bit length.
    ObjectTooLarge(usize),

    /// A decoded word does not fit into the target integer type.
    OutOfRange(u32),

    /// A string was not valid UTF-8.
    InvalidUtf8,
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::TruncatedData
        } else {
            Self::Io(e)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::TruncatedData => write!(f, "Truncated data"),
            Self::InvalidEnumValue(value) => write!(f, "Invalid enum value: {value}"),
            Self::InvalidLength(len) => write!(f, "Invalid length: {len}"),
            Self::ObjectTooLarge(size) => write!(f, "Object too large: {size} bytes"),
            Self::OutOfRange(value) => write!(f, "Value out of range: {value}"),
            Self::InvalidUtf8 => write!(f, "Invalid UTF-8 string"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}
