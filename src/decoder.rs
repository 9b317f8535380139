use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{
    datatypes::*,
    decoder::{bitmap::BitmapDecodeIterator, param::SimplePackingParam, stream::NBitwiseIterator},
    error::{ErrorKind, GribError},
};

mod bitmap;
mod param;
mod simple;
mod stream;

/// Errors in data that is well framed but cannot be turned into values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecodeError {
    /// Samples flagged as floating point whose width is not 32 bits.
    FloatWidthMismatch(u8),
    /// Floating point sample payload whose size is not a multiple of 4.
    FloatPayloadNotAligned(usize),
    InvalidBitsPerValue(u8),
    InsufficientPackedData {
        needed_bits: usize,
        available_bits: usize,
    },
    BitmapTooShort {
        num_points: usize,
        num_bits: usize,
    },
    NoGridDescription,
    PredefinedBitmapUnsupported(u16),
    /// Spherical harmonics or complex packing; carries the flag octet.
    PackingUnsupported(u8),
    UnsupportedProjection(u8),
    NumberOfPointsUnknown,
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FloatWidthMismatch(_)
            | Self::PredefinedBitmapUnsupported(_)
            | Self::PackingUnsupported(_)
            | Self::UnsupportedProjection(_) => ErrorKind::UnsupportedVariant,
            Self::FloatPayloadNotAligned(_)
            | Self::InvalidBitsPerValue(_)
            | Self::InsufficientPackedData { .. }
            | Self::BitmapTooShort { .. }
            | Self::NumberOfPointsUnknown => ErrorKind::InsufficientPrecisionInput,
            Self::NoGridDescription => ErrorKind::Other,
        }
    }
}

impl Error for DecodeError {}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::FloatWidthMismatch(n) => write!(
                f,
                "bits per value is {n}, wanted 32 for floating point values"
            ),
            Self::FloatPayloadNotAligned(len) => {
                write!(f, "floating point payload of {len} bytes is not divisible by 4")
            }
            Self::InvalidBitsPerValue(n) => {
                write!(f, "bits per value {n} is larger than 32")
            }
            Self::InsufficientPackedData {
                needed_bits,
                available_bits,
            } => write!(
                f,
                "packed data needs {needed_bits} bits, but only {available_bits} bits available"
            ),
            Self::BitmapTooShort {
                num_points,
                num_bits,
            } => write!(
                f,
                "bit-map has {num_bits} bits for a grid of {num_points} points"
            ),
            Self::NoGridDescription => write!(f, "message has no grid description"),
            Self::PredefinedBitmapUnsupported(n) => {
                write!(f, "predefined bit-map {n} is not supported")
            }
            Self::PackingUnsupported(flag) => {
                write!(f, "packing with flag {flag:#010b} is not supported")
            }
            Self::UnsupportedProjection(n) => {
                write!(f, "data representation type {n} is not supported")
            }
            Self::NumberOfPointsUnknown => write!(f, "number of points cannot be determined"),
        }
    }
}

/// Decodes the samples of a message into values in grid order.
///
/// Points masked out by the bit-map are NaN.
pub(crate) fn dispatch(
    product_definition: &ProductDefinition,
    grid_description: Option<&GridDescription>,
    bitmap: Option<&Bitmap>,
    binary_data: &BinaryData,
) -> Result<Box<[f32]>, GribError> {
    let grid_points = grid_description
        .and_then(|gd| gd.latlon())
        .map(|grid| grid.num_points());

    let (num_points, num_encoded) = match (bitmap, grid_points) {
        (Some(bitmap), _) if bitmap.table_reference != 0 => {
            return Err(DecodeError::PredefinedBitmapUnsupported(bitmap.table_reference).into());
        }
        (Some(bitmap), Some(n)) => {
            if bitmap.num_bits() < n {
                return Err(DecodeError::BitmapTooShort {
                    num_points: n,
                    num_bits: bitmap.num_bits(),
                }
                .into());
            }
            let num_encoded = (0..n).filter(|i| bitmap.is_set(*i)).count();
            (Some(n), Some(num_encoded))
        }
        (Some(bitmap), None) => (Some(bitmap.num_bits()), Some(bitmap.count_ones())),
        (None, Some(n)) => (Some(n), Some(n)),
        (None, None) => (None, None),
    };

    let encoded = match &binary_data.samples {
        Samples::Float(values) => decode_float(values, num_encoded)?,
        Samples::Packed(payload) => {
            decode_packed(product_definition, binary_data, payload, num_encoded)?
        }
    };

    let values = match (bitmap, num_points) {
        (Some(bitmap), Some(n)) => {
            let mask = bitmap.mask.as_deref().unwrap_or_default();
            let bits = NBitwiseIterator::new(mask, 1).with_bit_limit(n);
            BitmapDecodeIterator::new(bits, encoded.into_iter()).collect()
        }
        _ => encoded.into_boxed_slice(),
    };
    Ok(values)
}

fn decode_float(values: &[f32], num_encoded: Option<usize>) -> Result<Vec<f32>, GribError> {
    let n = num_encoded.unwrap_or(values.len());
    if values.len() < n {
        return Err(DecodeError::InsufficientPackedData {
            needed_bits: n * 32,
            available_bits: values.len() * 32,
        }
        .into());
    }
    Ok(values[..n].to_vec())
}

fn decode_packed(
    product_definition: &ProductDefinition,
    binary_data: &BinaryData,
    payload: &[u8],
    num_encoded: Option<usize>,
) -> Result<Vec<f32>, GribError> {
    let flag = binary_data.flag;
    if flag.is_spherical_harmonics() || flag.is_complex_packing() {
        return Err(DecodeError::PackingUnsupported(flag.0).into());
    }

    let nbit = usize::from(binary_data.bits_per_value);
    if nbit > 32 {
        return Err(DecodeError::InvalidBitsPerValue(binary_data.bits_per_value).into());
    }

    let available_bits = (payload.len() * 8).saturating_sub(usize::from(flag.num_unused_bits()));
    let num_encoded = match (num_encoded, nbit) {
        (Some(n), _) => n,
        (None, 0) => return Err(DecodeError::NumberOfPointsUnknown.into()),
        (None, nbit) => available_bits / nbit,
    };

    let needed_bits = num_encoded * nbit;
    if needed_bits > available_bits {
        return Err(DecodeError::InsufficientPackedData {
            needed_bits,
            available_bits,
        }
        .into());
    }

    let param =
        SimplePackingParam::from_sections(binary_data, product_definition.decimal_scale_factor);
    Ok(simple::decode(payload, param, num_encoded).collect())
}
