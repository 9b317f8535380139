use std::io::{self, Write};

use grib1::{
    BinaryData, BinaryDataFlag, Bitmap, GridDescription, LatLng, LatLonGrid, Message,
    ProductDefinition, Samples, ScanningMode, ibm_float_to_bytes,
};
use tempfile::NamedTempFile;

pub(crate) fn write_to_tempfile(data: &[u8]) -> Result<NamedTempFile, io::Error> {
    let mut out = NamedTempFile::new()?;
    out.write_all(data)?;
    Ok(out)
}

#[inline]
pub(crate) fn empty_file() -> Result<NamedTempFile, io::Error> {
    NamedTempFile::new()
}

pub(crate) fn too_small_file() -> Result<NamedTempFile, io::Error> {
    write_to_tempfile(b"foo")
}

pub(crate) fn non_grib_file() -> Result<NamedTempFile, io::Error> {
    write_to_tempfile(b"foo foo foo foo foo foo foo foo ")
}

fn product_definition(indicator_of_parameter: u8) -> ProductDefinition {
    ProductDefinition {
        table2_version: 128,
        centre: 98,
        generating_process: 145,
        grid_id: 255,
        flags: 0,
        indicator_of_parameter,
        level_type: 1,
        level: 0,
        year_of_century: 5,
        month: 3,
        day: 9,
        hour: 6,
        minute: 0,
        unit_of_time: 1,
        p1: 0,
        p2: 12,
        time_range_indicator: 4,
        num_in_average: 0,
        num_missing: 0,
        century: 21,
        sub_centre: 0,
        decimal_scale_factor: 0,
        local_use: Box::new([]),
    }
}

/// 87-byte message of 10u on a 2x2 grid with values 100 to 103.
pub(crate) fn gridded_message() -> Result<Vec<u8>, grib1::GribError> {
    let grid = LatLonGrid::new(
        2,
        2,
        LatLng::from_milli_degrees(0, 0),
        LatLng::from_milli_degrees(1_000, 1_000),
        ScanningMode(0b01000000),
    );
    let binary_data = BinaryData {
        flag: BinaryDataFlag(0b0010_0000),
        binary_scale_factor: 0,
        reference_value: ibm_float_to_bytes(100.0),
        bits_per_value: 8,
        samples: Samples::Packed(vec![0, 1, 2, 3].into_boxed_slice()),
    };
    let message = Message::from_parts(
        product_definition(165),
        Some(GridDescription::from_latlon(grid)),
        None,
        binary_data,
    );
    Ok(message.to_bytes()?.into_vec())
}

/// 59-byte message of ssrd without grid, holding floats 1.5 and 2.5.
pub(crate) fn gridless_message() -> Result<Vec<u8>, grib1::GribError> {
    let binary_data = BinaryData {
        flag: BinaryDataFlag(0),
        binary_scale_factor: 0,
        reference_value: [0; 4],
        bits_per_value: 32,
        samples: Samples::Float(vec![1.5, 2.5].into_boxed_slice()),
    };
    let message = Message::from_parts(product_definition(169), None, None, binary_data);
    Ok(message.to_bytes()?.into_vec())
}

pub(crate) fn bitmapped_message() -> Result<Vec<u8>, grib1::GribError> {
    bitmapped_message_with_mask(&[true, false, false, true])
}

/// Same points as [`bitmapped_message`], but the bit-map also sets the
/// padding bits after the fourth point.
pub(crate) fn bitmapped_message_with_set_padding() -> Result<Vec<u8>, grib1::GribError> {
    bitmapped_message_with_mask(&[true, false, false, true, true, true, true, true])
}

fn bitmapped_message_with_mask(mask: &[bool]) -> Result<Vec<u8>, grib1::GribError> {
    let grid = LatLonGrid::new(
        2,
        2,
        LatLng::from_milli_degrees(0, 0),
        LatLng::from_milli_degrees(1_000, 1_000),
        ScanningMode(0b01000000),
    );
    let binary_data = BinaryData {
        flag: BinaryDataFlag(0b0010_0000),
        binary_scale_factor: 0,
        reference_value: ibm_float_to_bytes(100.0),
        bits_per_value: 8,
        samples: Samples::Packed(vec![0, 1].into_boxed_slice()),
    };
    let message = Message::from_parts(
        product_definition(166),
        Some(GridDescription::from_latlon(grid)),
        Some(Bitmap::from_bools(mask)),
        binary_data,
    );
    Ok(message.to_bytes()?.into_vec())
}

/// The gridded message, 2 zero bytes and the gridless message.
pub(crate) fn two_messages() -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    let mut data = gridded_message()?;
    data.extend([0, 0]);
    data.extend(gridless_message()?);
    Ok(write_to_tempfile(&data)?)
}

/// The gridded message followed by a 20-byte edition 2 message.
pub(crate) fn with_edition2() -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    let mut data = gridded_message()?;
    let mut edition2 = b"GRIB\x00\x00\x00\x02".to_vec();
    edition2.extend(20_u64.to_be_bytes());
    edition2.resize(20, 0xaa);
    data.extend(edition2);
    Ok(write_to_tempfile(&data)?)
}

pub(crate) fn with_bitmap() -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    Ok(write_to_tempfile(&bitmapped_message()?)?)
}

pub(crate) fn with_bitmap_set_padding() -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    Ok(write_to_tempfile(&bitmapped_message_with_set_padding()?)?)
}
