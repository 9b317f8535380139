//! Code tables of GRIB edition 1.
//!
//! Numbers found in a message are converted into enum variants with
//! [`Code::from`] when the table knows them, and kept as raw numbers
//! otherwise.

use std::fmt::{self, Display, Formatter};

use num_enum::{TryFromPrimitive, TryFromPrimitiveError};

pub use self::grib1::*;
pub use self::Code::{Name, Num};

mod grib1;

/// A value read from a code table: either a known entry or the raw number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code<Enum, N> {
    Name(Enum),
    Num(N),
}

impl<Enum, N> Code<Enum, N> {
    pub fn name(&self) -> Option<&Enum> {
        match self {
            Name(e) => Some(e),
            Num(_) => None,
        }
    }
}

impl<Enum, N> Code<Enum, N>
where
    Enum: TryFromPrimitive<Primitive = N, Error = TryFromPrimitiveError<Enum>>,
{
    pub fn from_number(num: N) -> Self {
        Enum::try_from_primitive(num).into()
    }
}

impl<Enum, N> From<Result<Enum, TryFromPrimitiveError<Enum>>> for Code<Enum, N>
where
    Enum: TryFromPrimitive<Primitive = N>,
{
    fn from(result: Result<Enum, TryFromPrimitiveError<Enum>>) -> Self {
        match result {
            Ok(e) => Self::Name(e),
            Err(TryFromPrimitiveError { number: n }) => Self::Num(n),
        }
    }
}

impl<Enum, N> Display for Code<Enum, N>
where
    Enum: fmt::Debug,
    N: Display,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Name(e) => write!(f, "{e:?}"),
            Num(n) => write!(f, "code {n}"),
        }
    }
}
