use crate::{
    codetables::{Code, Table6},
    datatypes::*,
    decoder::DecodeError,
    error::*,
    grid::LatLonGrid,
    helpers::{
        GribInt, grib_int_to_bytes, grib_uint_from_bytes, grib_uint_to_bytes,
        ibm_float_from_bytes, read_as,
    },
    time::UtcDateTime,
};

#[cfg(feature = "time-calculation")]
use chrono::{DateTime, Utc};

const MAGIC: &[u8; 4] = b"GRIB";
const EDITION: u8 = 1;
const END_MARKER: &[u8; 4] = b"7777";

/// Section 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Indicator {
    /// Total length of GRIB message in octets (including Section 0)
    pub total_length: u32,
}

impl Indicator {
    pub const SIZE: usize = 8;

    pub(crate) fn from_slice(data: &[u8]) -> Result<(Self, usize), GribError> {
        if data.len() < Self::SIZE {
            return Err(ParseError::Truncated {
                section: SectionKind::Indicator,
                needed: Self::SIZE,
                available: data.len(),
            }
            .into());
        }

        if &data[..4] != MAGIC {
            return Err(ParseError::NotGRIB(data[..4].to_vec()).into());
        }

        let edition = data[7];
        if edition != EDITION {
            return Err(ParseError::GRIBVersionMismatch(edition).into());
        }

        let total_length = grib_uint_from_bytes(&data[4..7]);
        Ok((Self { total_length }, Self::SIZE))
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(MAGIC);
        buf.extend(grib_uint_to_bytes(self.total_length, 3));
        buf.push(EDITION);
    }
}

/// Section 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductDefinition {
    /// GRIB tables Version No. (currently 3 for international exchange)
    pub table2_version: u8,
    /// Identification of originating/generating centre (see Code table 0)
    pub centre: u8,
    /// Generating process identification number
    pub generating_process: u8,
    /// Grid definition (number of the catalogued grid used by the centre)
    pub grid_id: u8,
    /// Flag indicating the presence of sections 2 and 3 (see Code table 1)
    pub flags: u8,
    pub indicator_of_parameter: u8,
    /// Indicator of type of level or layer (see Code table 3)
    pub level_type: u8,
    /// Height, pressure, etc. of the level or layer
    pub level: u16,
    pub year_of_century: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// Indicator of unit of time range (see Code table 4)
    pub unit_of_time: u8,
    pub p1: u8,
    pub p2: u8,
    /// Time range indicator (see Code table 5)
    pub time_range_indicator: u8,
    /// Number included in calculation when octet 21 indicates an average or
    /// accumulation
    pub num_in_average: u16,
    /// Number missing from averages or accumulations
    pub num_missing: u8,
    /// Century of reference time of data
    pub century: u8,
    pub sub_centre: u8,
    /// Units decimal scale factor (D)
    pub decimal_scale_factor: i16,
    /// Octets 29 and following, reserved for local use.
    pub local_use: Box<[u8]>,
}

impl ProductDefinition {
    const FLAG_GRID_DESCRIPTION: u8 = 0b1000_0000;
    const FLAG_BITMAP: u8 = 0b0100_0000;

    pub(crate) fn from_slice(data: &[u8]) -> Result<(Self, usize), GribError> {
        let data = section_span(data, SectionKind::ProductDefinition)?;
        let pd = Self {
            table2_version: data[3],
            centre: data[4],
            generating_process: data[5],
            grid_id: data[6],
            flags: data[7],
            indicator_of_parameter: data[8],
            level_type: data[9],
            level: read_as!(u16, data, 10),
            year_of_century: data[12],
            month: data[13],
            day: data[14],
            hour: data[15],
            minute: data[16],
            unit_of_time: data[17],
            p1: data[18],
            p2: data[19],
            time_range_indicator: data[20],
            num_in_average: read_as!(u16, data, 21),
            num_missing: data[23],
            century: data[24],
            sub_centre: data[25],
            decimal_scale_factor: read_as!(u16, data, 26).as_grib_int(),
            local_use: data[28..].into(),
        };
        Ok((pd, data.len()))
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        let len = SectionKind::ProductDefinition.minimum_size() + self.local_use.len();
        buf.extend(grib_uint_to_bytes(len as u32, 3));
        buf.extend_from_slice(&[
            self.table2_version,
            self.centre,
            self.generating_process,
            self.grid_id,
            self.flags,
            self.indicator_of_parameter,
            self.level_type,
        ]);
        buf.extend_from_slice(&self.level.to_be_bytes());
        buf.extend_from_slice(&[
            self.year_of_century,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.unit_of_time,
            self.p1,
            self.p2,
            self.time_range_indicator,
        ]);
        buf.extend_from_slice(&self.num_in_average.to_be_bytes());
        buf.extend_from_slice(&[self.num_missing, self.century, self.sub_centre]);
        buf.extend(grib_int_to_bytes(i32::from(self.decimal_scale_factor), 2));
        buf.extend_from_slice(&self.local_use);
    }

    /// Returns `true` if the message contains a Grid Description Section.
    pub fn has_grid_description(&self) -> bool {
        self.flags & Self::FLAG_GRID_DESCRIPTION != 0
    }

    /// Returns `true` if the message contains a Bit Map Section.
    pub fn has_bitmap(&self) -> bool {
        self.flags & Self::FLAG_BITMAP != 0
    }

    pub(crate) fn set_section_flags(&mut self, grid_description: bool, bitmap: bool) {
        self.flags &= !(Self::FLAG_GRID_DESCRIPTION | Self::FLAG_BITMAP);
        if grid_description {
            self.flags |= Self::FLAG_GRID_DESCRIPTION;
        }
        if bitmap {
            self.flags |= Self::FLAG_BITMAP;
        }
    }

    /// Returns the year of the reference time, taking the century octet into
    /// account.
    ///
    /// Year of century 100 is the last year of the century, so century 20
    /// with year 100 is 2000.
    pub fn year(&self) -> u16 {
        u16::from(self.century).saturating_sub(1) * 100 + u16::from(self.year_of_century)
    }

    /// Reference time of data, without validation.
    pub fn ref_time(&self) -> UtcDateTime {
        UtcDateTime::new(
            self.year(),
            self.month,
            self.day,
            self.hour,
            self.minute,
            0,
        )
    }

    /// Reference time of data as a validated date and time.
    #[cfg(feature = "time-calculation")]
    pub fn ref_date_time(&self) -> Result<DateTime<Utc>, GribError> {
        crate::time::create_date_time(
            i32::from(self.year()),
            u32::from(self.month),
            u32::from(self.day),
            u32::from(self.hour),
            u32::from(self.minute),
            0,
        )
    }

    pub fn forecast_time(&self) -> ForecastTime {
        ForecastTime::from_numbers(
            self.unit_of_time,
            self.p1,
            self.p2,
            self.time_range_indicator,
        )
    }

    pub fn parameter(&self) -> Parameter {
        Parameter {
            table_version: self.table2_version,
            centre: self.centre,
            num: self.indicator_of_parameter,
        }
    }
}

/// Section 2.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridDescription {
    /// NV, the number of vertical coordinate parameters
    pub num_vertical_coordinates: u8,
    /// PV or PL, the location of the list of vertical coordinate parameters
    /// or of the list of numbers of points in each row
    pub pv_pl_location: u8,
    /// Data representation type (see Code table 6)
    pub data_representation_type: u8,
    pub representation: GridRepresentation,
}

/// Representation-specific part of the grid description, starting at
/// octet 7.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GridRepresentation {
    LatLon(LatLonGrid),
    /// Octets of a representation type without a decoder.
    Unparsed(Box<[u8]>),
}

impl GridDescription {
    const LATLON_SIZE: usize = 32;

    pub(crate) fn from_slice(data: &[u8]) -> Result<(Self, usize), GribError> {
        let data = section_span(data, SectionKind::GridDescription)?;
        let data_representation_type = data[5];
        let representation = match data_representation_type {
            0 => {
                // Octets 29-32 are reserved but some producers omit them.
                let minimum = Self::LATLON_SIZE - 4;
                if data.len() < minimum {
                    return Err(ParseError::SectionTooShort {
                        section: SectionKind::GridDescription,
                        declared: data.len(),
                        minimum,
                    }
                    .into());
                }
                GridRepresentation::LatLon(LatLonGrid::from_buf(&data[6..]))
            }
            _ => GridRepresentation::Unparsed(data[6..].into()),
        };

        let gd = Self {
            num_vertical_coordinates: data[3],
            pv_pl_location: data[4],
            data_representation_type,
            representation,
        };
        Ok((gd, data.len()))
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        let mut body = Vec::new();
        match &self.representation {
            GridRepresentation::LatLon(grid) => grid.write_to(&mut body),
            GridRepresentation::Unparsed(bytes) => body.extend_from_slice(bytes),
        }
        let len = SectionKind::GridDescription.minimum_size() + body.len();
        buf.extend(grib_uint_to_bytes(len as u32, 3));
        buf.extend_from_slice(&[
            self.num_vertical_coordinates,
            self.pv_pl_location,
            self.data_representation_type,
        ]);
        buf.extend(body);
    }

    /// Creates a grid description for a latitude/longitude grid.
    pub fn from_latlon(grid: LatLonGrid) -> Self {
        Self {
            num_vertical_coordinates: 0,
            pv_pl_location: 255,
            data_representation_type: 0,
            representation: GridRepresentation::LatLon(grid),
        }
    }

    pub fn representation_type(&self) -> Code<Table6, u8> {
        Code::from_number(self.data_representation_type)
    }

    /// Returns the grid type name, such as "regular_ll".
    pub fn short_name(&self) -> &'static str {
        self.representation_type()
            .name()
            .map_or("unknown", |t| t.short_name())
    }

    /// Returns the latitude/longitude grid if the representation type is 0.
    pub fn latlon(&self) -> Option<&LatLonGrid> {
        match &self.representation {
            GridRepresentation::LatLon(grid) => Some(grid),
            GridRepresentation::Unparsed(_) => None,
        }
    }
}

/// Section 3.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bitmap {
    /// Number of unused bits at end of the section
    pub num_unused_bits: u8,
    /// Numeric identifier of a predefined bit-map, or 0 if the bit-map
    /// follows
    pub table_reference: u16,
    /// One bit per grid point, present when the table reference is 0.
    pub mask: Option<Box<[u8]>>,
}

impl Bitmap {
    pub(crate) fn from_slice(data: &[u8]) -> Result<(Self, usize), GribError> {
        let data = section_span(data, SectionKind::Bitmap)?;
        let table_reference = read_as!(u16, data, 4);
        let mask = if table_reference == 0 {
            Some(data[6..].into())
        } else {
            None
        };
        let bitmap = Self {
            num_unused_bits: data[3],
            table_reference,
            mask,
        };
        Ok((bitmap, data.len()))
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        let mask: &[u8] = self.mask.as_deref().unwrap_or_default();
        let len = SectionKind::Bitmap.minimum_size() + mask.len();
        buf.extend(grib_uint_to_bytes(len as u32, 3));
        buf.push(self.num_unused_bits);
        buf.extend_from_slice(&self.table_reference.to_be_bytes());
        buf.extend_from_slice(mask);
    }

    /// Creates a bit-map section from one flag per grid point.
    ///
    /// # Examples
    ///
    /// ```
    /// let bitmap = grib1::Bitmap::from_bools(&[true, false, true]);
    /// assert_eq!(bitmap.num_bits(), 3);
    /// assert_eq!(bitmap.count_ones(), 2);
    /// assert!(!bitmap.is_set(1));
    /// ```
    pub fn from_bools(points: &[bool]) -> Self {
        let mut mask = vec![0_u8; points.len().div_ceil(8)];
        for (i, _) in points.iter().enumerate().filter(|(_, set)| **set) {
            mask[i / 8] |= 0b1000_0000 >> (i % 8);
        }
        let num_unused_bits = (mask.len() * 8 - points.len()) as u8;
        Self {
            num_unused_bits,
            table_reference: 0,
            mask: Some(mask.into_boxed_slice()),
        }
    }

    /// Number of meaningful bits in the mask.
    pub fn num_bits(&self) -> usize {
        self.mask.as_ref().map_or(0, |mask| {
            (mask.len() * 8).saturating_sub(usize::from(self.num_unused_bits))
        })
    }

    pub fn is_set(&self, index: usize) -> bool {
        match &self.mask {
            Some(mask) if index < self.num_bits() => {
                mask[index / 8] & (0b1000_0000 >> (index % 8)) != 0
            }
            _ => false,
        }
    }

    /// Number of grid points marked as present.
    pub fn count_ones(&self) -> usize {
        (0..self.num_bits()).filter(|i| self.is_set(*i)).count()
    }
}

/// Flag octet of the Binary Data Section (see Code table 11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryDataFlag(pub u8);

impl BinaryDataFlag {
    pub fn is_spherical_harmonics(&self) -> bool {
        self.0 & 0b1000_0000 != 0
    }

    pub fn is_complex_packing(&self) -> bool {
        self.0 & 0b0100_0000 != 0
    }

    /// Returns `true` if the original data were integers and samples are
    /// packed, and `false` if samples are stored as 32-bit floating point
    /// numbers.
    pub fn has_integer_values(&self) -> bool {
        self.0 & 0b0010_0000 != 0
    }

    pub fn has_additional_flags(&self) -> bool {
        self.0 & 0b0001_0000 != 0
    }

    /// Number of unused bits at the end of the section.
    pub fn num_unused_bits(&self) -> u8 {
        self.0 & 0b0000_1111
    }
}

/// Sample payload of the Binary Data Section.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    /// Samples stored directly as 32-bit floating point numbers.
    Float(Box<[f32]>),
    /// Octets of the packed bit stream, still to be unpacked.
    Packed(Box<[u8]>),
}

/// Section 4.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryData {
    pub flag: BinaryDataFlag,
    /// Scale factor (E)
    pub binary_scale_factor: i16,
    /// Reference value (R) as the four octets found in the message.
    pub reference_value: [u8; 4],
    /// Number of bits containing each packed value
    pub bits_per_value: u8,
    pub samples: Samples,
}

impl BinaryData {
    const FLOAT_WIDTH: u8 = 32;

    pub(crate) fn from_slice(data: &[u8]) -> Result<(Self, usize), GribError> {
        let data = section_span(data, SectionKind::BinaryData)?;
        let flag = BinaryDataFlag(data[3]);
        let binary_scale_factor = read_as!(u16, data, 4).as_grib_int();
        let reference_value = [data[6], data[7], data[8], data[9]];
        let bits_per_value = data[10];
        let payload = &data[11..];

        let samples = if flag.has_integer_values() {
            Samples::Packed(payload.into())
        } else {
            if bits_per_value != Self::FLOAT_WIDTH {
                return Err(DecodeError::FloatWidthMismatch(bits_per_value).into());
            }
            if payload.len() % 4 != 0 {
                return Err(DecodeError::FloatPayloadNotAligned(payload.len()).into());
            }
            let values = payload
                .chunks_exact(4)
                .map(|chunk| read_as!(f32, chunk, 0))
                .collect();
            Samples::Float(values)
        };

        let bd = Self {
            flag,
            binary_scale_factor,
            reference_value,
            bits_per_value,
            samples,
        };
        Ok((bd, data.len()))
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        let payload = match &self.samples {
            Samples::Float(values) => values.iter().flat_map(|v| v.to_be_bytes()).collect(),
            Samples::Packed(bytes) => bytes.to_vec(),
        };
        let len = SectionKind::BinaryData.minimum_size() + payload.len();
        buf.extend(grib_uint_to_bytes(len as u32, 3));
        buf.push(self.flag.0);
        buf.extend(grib_int_to_bytes(i32::from(self.binary_scale_factor), 2));
        buf.extend_from_slice(&self.reference_value);
        buf.push(self.bits_per_value);
        buf.extend(payload);
    }

    /// Reference value (R) decoded as an IBM single precision floating point
    /// number.
    pub fn reference_value(&self) -> f64 {
        ibm_float_from_bytes(self.reference_value)
    }

    /// Reference value octets read as an unsigned integer.
    pub fn raw_reference_value(&self) -> u32 {
        u32::from_be_bytes(self.reference_value)
    }
}

/// Section 5. Carries no data and is only validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EndSection;

impl EndSection {
    pub(crate) fn from_slice(data: &[u8]) -> Result<(Self, usize), GribError> {
        let size = SectionKind::End.minimum_size();
        if data.len() < size {
            return Err(ParseError::Truncated {
                section: SectionKind::End,
                needed: size,
                available: data.len(),
            }
            .into());
        }

        let marker = &data[..size];
        if marker != END_MARKER {
            return Err(ParseError::EndSectionMismatch(marker.to_vec()).into());
        }
        Ok((Self, size))
    }

    pub(crate) fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(END_MARKER);
    }
}
