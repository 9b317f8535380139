use grib1::{
    BinaryData, BinaryDataFlag, Bitmap, GridDescription, LatLng, LatLonGrid, Message,
    ProductDefinition, ResolutionFlags, Samples, ScanningMode, ibm_float_to_bytes,
};

pub(crate) fn product_definition(indicator_of_parameter: u8) -> ProductDefinition {
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

/// 2x2 grid with points 1 degree apart and explicit increments.
pub(crate) fn grid_2x2(scanning_mode: u8) -> GridDescription {
    GridDescription::from_latlon(LatLonGrid {
        ni: 2,
        nj: 2,
        first_point: LatLng::from_milli_degrees(0, 0),
        resolution_flags: ResolutionFlags(0b10000000),
        last_point: LatLng::from_milli_degrees(1_000, 1_000),
        i_increment: 1_000,
        j_increment: 1_000,
        scanning_mode: ScanningMode(scanning_mode),
        remainder: vec![0; 4].into_boxed_slice(),
    })
}

pub(crate) fn packed_u8(reference_value: f64, binary_scale_factor: i16, samples: &[u8]) -> BinaryData {
    BinaryData {
        flag: BinaryDataFlag(0b0010_0000),
        binary_scale_factor,
        reference_value: ibm_float_to_bytes(reference_value),
        bits_per_value: 8,
        samples: Samples::Packed(samples.into()),
    }
}

pub(crate) fn float_samples(samples: &[f32]) -> BinaryData {
    BinaryData {
        flag: BinaryDataFlag(0),
        binary_scale_factor: 0,
        reference_value: [0; 4],
        bits_per_value: 32,
        samples: Samples::Float(samples.into()),
    }
}

pub(crate) fn encode(
    product_definition: ProductDefinition,
    grid_description: Option<GridDescription>,
    bitmap: Option<Bitmap>,
    binary_data: BinaryData,
) -> Vec<u8> {
    Message::from_parts(product_definition, grid_description, bitmap, binary_data)
        .to_bytes()
        .map(Vec::from)
        .unwrap_or_default()
}

pub(crate) fn simple_message(indicator_of_parameter: u8) -> Vec<u8> {
    encode(
        product_definition(indicator_of_parameter),
        Some(grid_2x2(0b01000000)),
        None,
        packed_u8(100.0, 0, &[0, 1, 2, 3]),
    )
}

/// An edition 2 message that is only framed correctly.
pub(crate) fn edition2_stub(length: usize) -> Vec<u8> {
    let mut data = b"GRIB\x00\x00\x00\x02".to_vec();
    data.extend((length as u64).to_be_bytes());
    data.resize(length, 0xaa);
    data
}
