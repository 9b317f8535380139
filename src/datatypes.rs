use std::fmt::{self, Display, Formatter};

use crate::{error::ParseError, helpers::grib_uint_from_bytes};

mod product_attributes;
pub use product_attributes::*;
mod sections;
pub use sections::*;

/// The six kinds of sections a GRIB1 message is made of, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Indicator,
    ProductDefinition,
    GridDescription,
    Bitmap,
    BinaryData,
    End,
}

impl SectionKind {
    /// Section number as used in the WMO manual (0 for the indicator, 5 for
    /// the end section).
    pub fn number(&self) -> u8 {
        match self {
            Self::Indicator => 0,
            Self::ProductDefinition => 1,
            Self::GridDescription => 2,
            Self::Bitmap => 3,
            Self::BinaryData => 4,
            Self::End => 5,
        }
    }

    /// Smallest number of octets a section of this kind can occupy.
    pub fn minimum_size(&self) -> usize {
        match self {
            Self::Indicator => 8,
            Self::ProductDefinition => 28,
            Self::GridDescription => 6,
            Self::Bitmap => 6,
            Self::BinaryData => 11,
            Self::End => 4,
        }
    }
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let s = match self {
            Self::Indicator => "Indicator Section",
            Self::ProductDefinition => "Product Definition Section",
            Self::GridDescription => "Grid Description Section",
            Self::Bitmap => "Bit Map Section",
            Self::BinaryData => "Binary Data Section",
            Self::End => "End Section",
        };
        write!(f, "{s}")
    }
}

/// Position of a section inside the buffer its message was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionInfo {
    pub kind: SectionKind,
    /// Offset from the start of the message.
    pub offset: usize,
    pub size: usize,
}

/// Returns the span of a length-prefixed section at the start of `data`.
///
/// The declared length is checked against the available bytes before
/// anything else is read, and against the fixed part of the section.
pub(crate) fn section_span(data: &[u8], kind: SectionKind) -> Result<&[u8], ParseError> {
    if data.len() < 3 {
        return Err(ParseError::Truncated {
            section: kind,
            needed: 3,
            available: data.len(),
        });
    }

    let declared = grib_uint_from_bytes(&data[..3]) as usize;
    if declared > data.len() {
        return Err(ParseError::Truncated {
            section: kind,
            needed: declared,
            available: data.len(),
        });
    }

    let minimum = kind.minimum_size();
    if declared < minimum {
        return Err(ParseError::SectionTooShort {
            section: kind,
            declared,
            minimum,
        });
    }

    Ok(&data[..declared])
}
