//! Readers and writers for the numeric representations used in GRIB1.
//!
//! All multi-octet quantities are big-endian. Signed integers use the
//! sign-magnitude convention (the most significant bit of the first octet is
//! the sign, the remaining bits are the magnitude), which is not
//! two's-complement. Reals use the IBM System/360 single precision
//! hexadecimal floating-point representation.

pub(crate) trait GribInt<I> {
    fn as_grib_int(&self) -> I;
}

macro_rules! add_impl_for_ints {
    ($(($ty_src:ty, $ty_dst:ty),)*) => ($(
        impl GribInt<$ty_dst> for $ty_src {
            fn as_grib_int(&self) -> $ty_dst {
                if self.leading_zeros() == 0 {
                    let abs = (self << 1 >> 1) as $ty_dst;
                    -abs
                } else {
                    *self as $ty_dst
                }
            }
        }
    )*);
}

add_impl_for_ints! {
    (u8, i8),
    (u16, i16),
    (u32, i32),
}

/// Reads a big-endian value of type `$ty` at `$start`.
///
/// Callers check the length of `$buf` beforehand.
macro_rules! read_as {
    ($ty:ty, $buf:ident, $start:expr) => {{
        let end = $start + std::mem::size_of::<$ty>();
        let mut bytes = [0; std::mem::size_of::<$ty>()];
        bytes.copy_from_slice(&$buf[$start..end]);
        <$ty>::from_be_bytes(bytes)
    }};
}
pub(crate) use read_as;

/// Assembles a big-endian unsigned integer from 1 to 4 octets.
///
/// # Examples
///
/// ```
/// assert_eq!(grib1::grib_uint_from_bytes(&[0x01, 0x02]), 0x0102);
/// assert_eq!(grib1::grib_uint_from_bytes(&[0x01, 0x02, 0x03]), 0x010203);
/// ```
pub fn grib_uint_from_bytes(bytes: &[u8]) -> u32 {
    debug_assert!(bytes.len() <= 4);
    bytes
        .iter()
        .fold(0_u32, |acc, byte| (acc << 8) | u32::from(*byte))
}

/// Decodes a sign-magnitude integer from 1 to 4 octets.
///
/// # Examples
///
/// ```
/// assert_eq!(grib1::grib_int_from_bytes(&[0b10000001, 0x03]), -259);
/// assert_eq!(grib1::grib_int_from_bytes(&[0x00, 0x10]), 16);
/// ```
pub fn grib_int_from_bytes(bytes: &[u8]) -> i32 {
    let len = bytes.len();
    // Although there is logic that can be used to generalize, not so many patterns
    // exist that generalization is necessary.
    match len {
        1 => i32::from(read_as!(u8, bytes, 0).as_grib_int()),
        2 => i32::from(read_as!(u16, bytes, 0).as_grib_int()),
        3 => {
            let first = read_as!(u8, bytes, 0);
            let positive = first.leading_zeros() != 0;
            let rest = i32::from(read_as!(u16, bytes, 1));
            let abs = i32::from(first << 1 >> 1) * 0x10000 + rest;
            if positive { abs } else { -abs }
        }
        4 => read_as!(u32, bytes, 0).as_grib_int(),
        _ => 0,
    }
}

/// Encodes `value` as a sign-magnitude integer of `len` octets (1 to 4).
///
/// Magnitudes that do not fit in `len * 8 - 1` bits are clamped to the
/// largest representable magnitude.
///
/// # Examples
///
/// ```
/// assert_eq!(grib1::grib_int_to_bytes(-259, 2), vec![0b10000001, 0x03]);
/// assert_eq!(grib1::grib_int_to_bytes(100_000, 2), vec![0x7f, 0xff]);
/// ```
pub fn grib_int_to_bytes(value: i32, len: usize) -> Vec<u8> {
    let len = len.clamp(1, 4);
    let nbits = len * 8;
    let max_magnitude = (1_u32 << (nbits - 1)) - 1;
    let magnitude = value.unsigned_abs().min(max_magnitude);
    let encoded = if value < 0 {
        magnitude | (1 << (nbits - 1))
    } else {
        magnitude
    };
    encoded.to_be_bytes()[4 - len..].to_vec()
}

/// Encodes `value` as a big-endian unsigned integer of `len` octets (1 to 4),
/// keeping only the low-order octets.
pub fn grib_uint_to_bytes(value: u32, len: usize) -> Vec<u8> {
    let len = len.clamp(1, 4);
    value.to_be_bytes()[4 - len..].to_vec()
}

/// Decodes a 4-octet IBM single precision hexadecimal floating-point number.
///
/// The value is `(-1)^s * B * 2^(4 * (A - 64) - 24)` where `s` is the top bit
/// of the first octet, `A` the remaining 7 bits of that octet and `B` the
/// 24-bit mantissa in the other three octets.
///
/// # Examples
///
/// ```
/// assert_eq!(grib1::ibm_float_from_bytes([0b1100_0010, 0b0111_0110, 0b1010_0000, 0]), -118.625);
/// assert_eq!(grib1::ibm_float_from_bytes([0, 0, 0, 0]), 0.0);
/// ```
pub fn ibm_float_from_bytes(bytes: [u8; 4]) -> f64 {
    let negative = bytes[0] & 0b1000_0000 != 0;
    let exponent = i32::from(bytes[0] & 0b0111_1111);
    let mantissa = u32::from_be_bytes([0, bytes[1], bytes[2], bytes[3]]);
    if mantissa == 0 {
        return 0.0;
    }

    let value = f64::from(mantissa) * 2_f64.powi(4 * (exponent - 64) - 24);
    if negative { -value } else { value }
}

/// Encodes `value` as a 4-octet IBM single precision hexadecimal
/// floating-point number, rounding the mantissa to 24 bits.
///
/// Values too small for the format become zero and values too large (or not
/// finite) saturate to the largest representable magnitude.
pub fn ibm_float_to_bytes(value: f64) -> [u8; 4] {
    const MAX: [u8; 4] = [0x7f, 0xff, 0xff, 0xff];

    if value == 0.0 || value.is_nan() {
        return [0; 4];
    }
    let sign = if value < 0.0 { 0b1000_0000 } else { 0 };
    if value.is_infinite() {
        return [MAX[0] | sign, MAX[1], MAX[2], MAX[3]];
    }

    let mut fraction = value.abs();
    let mut exponent = 64_i32;
    while fraction >= 1.0 {
        fraction /= 16.0;
        exponent += 1;
    }
    while fraction < 1.0 / 16.0 {
        fraction *= 16.0;
        exponent -= 1;
    }

    let mut mantissa = (fraction * f64::from(1_u32 << 24)).round() as u32;
    if mantissa >= 1 << 24 {
        mantissa >>= 4;
        exponent += 1;
    }

    if exponent < 0 {
        return [0; 4];
    }
    if exponent > 127 {
        return [MAX[0] | sign, MAX[1], MAX[2], MAX[3]];
    }

    let [_, b1, b2, b3] = mantissa.to_be_bytes();
    [exponent as u8 | sign, b1, b2, b3]
}
