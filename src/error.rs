use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io,
};

use crate::{datatypes::SectionKind, decoder::DecodeError};

/// Coarse classification of errors, useful for callers that only need to
/// know what went wrong rather than exactly where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad magic, bad edition number or bad end sentinel.
    Framing,
    /// A declared length exceeds the available bytes, or a section is shorter
    /// than its fixed part.
    Truncation,
    /// The bytes consumed by a message differ from its declared length.
    LengthMismatch,
    /// No decoder exists for a projection or packing variant.
    UnsupportedVariant,
    /// Packed data whose width or size cannot be right.
    InsufficientPrecisionInput,
    /// Values that are well-framed but semantically invalid, and I/O errors.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GribError {
    ParseError(ParseError),
    DecodeError(DecodeError),
    /// A failure while decoding the named section of a message.
    SectionError {
        section: SectionKind,
        source: Box<GribError>,
    },
    /// A failure while decoding the message starting at byte `offset` of the
    /// input.
    MessageError {
        offset: usize,
        source: Box<GribError>,
    },
    InvalidValueError(String),
    ReadError(String),
}

impl GribError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ParseError(e) => e.kind(),
            Self::DecodeError(e) => e.kind(),
            Self::SectionError { source, .. } => source.kind(),
            Self::MessageError { source, .. } => source.kind(),
            Self::InvalidValueError(_) | Self::ReadError(_) => ErrorKind::Other,
        }
    }

    /// Returns the innermost error, unwrapping section and message context.
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::SectionError { source, .. } | Self::MessageError { source, .. } => {
                source.root_cause()
            }
            _ => self,
        }
    }

    pub(crate) fn in_section(self, section: SectionKind) -> Self {
        Self::SectionError {
            section,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_message_at(self, offset: usize) -> Self {
        Self::MessageError {
            offset,
            source: Box::new(self),
        }
    }
}

impl Error for GribError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ParseError(e) => Some(e),
            Self::DecodeError(e) => Some(e),
            Self::SectionError { source, .. } | Self::MessageError { source, .. } => {
                Some(source.as_ref())
            }
            _ => None,
        }
    }
}

impl From<ParseError> for GribError {
    fn from(e: ParseError) -> Self {
        Self::ParseError(e)
    }
}

impl From<DecodeError> for GribError {
    fn from(e: DecodeError) -> Self {
        Self::DecodeError(e)
    }
}

impl From<io::Error> for GribError {
    fn from(e: io::Error) -> Self {
        Self::ReadError(e.to_string())
    }
}

impl Display for GribError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::ParseError(e) => write!(f, "{e}"),
            Self::DecodeError(e) => write!(f, "{e}"),
            Self::SectionError { section, source } => {
                write!(f, "error decoding {section}: {source}")
            }
            Self::MessageError { offset, source } => {
                write!(f, "error reading GRIB record @ byte offset {offset}: {source}")
            }
            Self::InvalidValueError(s) => write!(f, "Invalid value: {s}"),
            Self::ReadError(s) => write!(f, "Read error: {s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// The first four octets are not "GRIB"; carries the octets found.
    NotGRIB(Vec<u8>),
    GRIBVersionMismatch(u8),
    /// The End Section is not "7777"; carries the octets found.
    EndSectionMismatch(Vec<u8>),
    Truncated {
        section: SectionKind,
        needed: usize,
        available: usize,
    },
    SectionTooShort {
        section: SectionKind,
        declared: usize,
        minimum: usize,
    },
    MessageLengthMismatch {
        declared: usize,
        consumed: usize,
    },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotGRIB(_) | Self::GRIBVersionMismatch(_) | Self::EndSectionMismatch(_) => {
                ErrorKind::Framing
            }
            Self::Truncated { .. } | Self::SectionTooShort { .. } => ErrorKind::Truncation,
            Self::MessageLengthMismatch { .. } => ErrorKind::LengthMismatch,
        }
    }
}

impl Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::NotGRIB(bytes) => write!(
                f,
                "Not GRIB data: first four bytes = {:?}, want \"GRIB\"",
                String::from_utf8_lossy(bytes)
            ),
            Self::GRIBVersionMismatch(i) => {
                write!(f, "got GRIB edition {i}, expected edition 1")
            }
            Self::EndSectionMismatch(bytes) => write!(
                f,
                "Content of End Section is not valid: got {:?}, want \"7777\"",
                String::from_utf8_lossy(bytes)
            ),
            Self::Truncated {
                section,
                needed,
                available,
            } => write!(
                f,
                "{section} needs {needed} bytes, but only {available} bytes supplied"
            ),
            Self::SectionTooShort {
                section,
                declared,
                minimum,
            } => write!(
                f,
                "{section} claims its length is {declared}, which is shorter than the minimum {minimum}"
            ),
            Self::MessageLengthMismatch { declared, consumed } => write!(
                f,
                "consumed {consumed} bytes, expected to consume {declared} based on message length in header"
            ),
        }
    }
}
