use std::fmt::{self, Display, Formatter};

use crate::{
    datatypes::*,
    decoder::{self, DecodeError},
    error::*,
    grid::{GridPointIterator, LatLonGrid},
    observer::{DecodeObserver, NoopObserver},
    time::UtcDateTime,
};

const MAX_MESSAGE_LENGTH: usize = 0xff_ffff;

/// States of message assembly, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblerState {
    Indicator,
    ProductDefinition,
    GridDescription,
    Bitmap,
    BinaryData,
    End,
    Verify,
}

impl AssemblerState {
    fn section(&self) -> Option<SectionKind> {
        match self {
            Self::Indicator => Some(SectionKind::Indicator),
            Self::ProductDefinition => Some(SectionKind::ProductDefinition),
            Self::GridDescription => Some(SectionKind::GridDescription),
            Self::Bitmap => Some(SectionKind::Bitmap),
            Self::BinaryData => Some(SectionKind::BinaryData),
            Self::End => Some(SectionKind::End),
            Self::Verify => None,
        }
    }

    /// Optional sections are skipped unless flagged in the product
    /// definition.
    fn next(self, product_definition: Option<&ProductDefinition>) -> Self {
        let (has_grid_description, has_bitmap) = product_definition
            .map_or((false, false), |pd| (pd.has_grid_description(), pd.has_bitmap()));
        match self {
            Self::Indicator => Self::ProductDefinition,
            Self::ProductDefinition if has_grid_description => Self::GridDescription,
            Self::ProductDefinition | Self::GridDescription if has_bitmap => Self::Bitmap,
            Self::ProductDefinition | Self::GridDescription | Self::Bitmap => Self::BinaryData,
            Self::BinaryData => Self::End,
            Self::End | Self::Verify => Self::Verify,
        }
    }
}

/// One decoded GRIB1 message.
///
/// A `Message` owns copies of all section contents and does not borrow the
/// buffer it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    indicator: Indicator,
    product_definition: ProductDefinition,
    grid_description: Option<GridDescription>,
    bitmap: Option<Bitmap>,
    binary_data: BinaryData,
    sections: Box<[SectionInfo]>,
}

impl Message {
    /// Decodes the message at the start of `data`.
    ///
    /// Bytes after the length declared in the Indicator Section are ignored.
    pub fn from_slice(data: &[u8]) -> Result<Self, GribError> {
        Self::assemble(data, 0, &mut NoopObserver)
    }

    /// Same as [`from_slice`](Message::from_slice), reporting each decoded
    /// section to `observer`.
    pub fn from_slice_with_observer<O: DecodeObserver>(
        data: &[u8],
        observer: &mut O,
    ) -> Result<Self, GribError> {
        Self::assemble(data, 0, observer)
    }

    /// Runs the section sequence on `data`, whose first byte is at offset
    /// `base` of the input.
    pub(crate) fn assemble<O: DecodeObserver>(
        data: &[u8],
        base: usize,
        observer: &mut O,
    ) -> Result<Self, GribError> {
        let mut indicator = None;
        let mut product_definition = None;
        let mut grid_description = None;
        let mut bitmap = None;
        let mut binary_data = None;
        let mut sections = Vec::with_capacity(6);

        let mut declared = data.len();
        let mut pos = 0;
        let mut state = AssemblerState::Indicator;

        while let Some(kind) = state.section() {
            let rest = &data[pos..];
            if rest.is_empty() {
                let err: GribError = ParseError::Truncated {
                    section: kind,
                    needed: kind.minimum_size(),
                    available: 0,
                }
                .into();
                return Err(err.in_section(kind));
            }

            let wrap = |e: GribError| e.in_section(kind);
            let decoded = match state {
                AssemblerState::Indicator => {
                    Indicator::from_slice(rest).and_then(|(section, size)| {
                        let total = section.total_length as usize;
                        if total > data.len() {
                            return Err(ParseError::Truncated {
                                section: kind,
                                needed: total,
                                available: data.len(),
                            }
                            .into());
                        }
                        if total < size {
                            return Err(ParseError::MessageLengthMismatch {
                                declared: total,
                                consumed: size,
                            }
                            .into());
                        }
                        declared = total;
                        indicator = Some(section);
                        Ok(size)
                    })
                }
                AssemblerState::ProductDefinition => ProductDefinition::from_slice(rest)
                    .map(|(section, size)| {
                        product_definition = Some(section);
                        size
                    }),
                AssemblerState::GridDescription => {
                    GridDescription::from_slice(rest).map(|(section, size)| {
                        grid_description = Some(section);
                        size
                    })
                }
                AssemblerState::Bitmap => Bitmap::from_slice(rest).map(|(section, size)| {
                    bitmap = Some(section);
                    size
                }),
                AssemblerState::BinaryData => {
                    BinaryData::from_slice(rest).map(|(section, size)| {
                        binary_data = Some(section);
                        size
                    })
                }
                AssemblerState::End => EndSection::from_slice(rest).map(|(_, size)| size),
                AssemblerState::Verify => break,
            };
            // Sections are read from the whole input, so one running past the
            // declared message end is a length mismatch rather than truncation.
            let size = match decoded {
                Ok(size) if pos + size > declared => {
                    return Err(ParseError::MessageLengthMismatch {
                        declared,
                        consumed: pos + size,
                    }
                    .into());
                }
                Ok(size) => size,
                Err(_) if pos >= declared => {
                    return Err(ParseError::MessageLengthMismatch {
                        declared,
                        consumed: pos,
                    }
                    .into());
                }
                Err(e) => return Err(wrap(e)),
            };

            observer.on_section(kind, base + pos, size);
            sections.push(SectionInfo {
                kind,
                offset: pos,
                size,
            });
            pos += size;
            state = state.next(product_definition.as_ref());
        }

        if pos != declared {
            return Err(ParseError::MessageLengthMismatch {
                declared,
                consumed: pos,
            }
            .into());
        }

        let missing = |kind: SectionKind| -> GribError {
            ParseError::Truncated {
                section: kind,
                needed: kind.minimum_size(),
                available: 0,
            }
            .into()
        };
        let indicator = indicator.ok_or_else(|| missing(SectionKind::Indicator))?;
        let product_definition =
            product_definition.ok_or_else(|| missing(SectionKind::ProductDefinition))?;
        let binary_data = binary_data.ok_or_else(|| missing(SectionKind::BinaryData))?;

        Ok(Self {
            indicator,
            product_definition,
            grid_description,
            bitmap,
            binary_data,
            sections: sections.into_boxed_slice(),
        })
    }

    /// Builds a message from its sections.
    ///
    /// The presence flags of the product definition are set from the given
    /// optional sections and the total length is computed.
    pub fn from_parts(
        mut product_definition: ProductDefinition,
        grid_description: Option<GridDescription>,
        bitmap: Option<Bitmap>,
        binary_data: BinaryData,
    ) -> Self {
        product_definition.set_section_flags(grid_description.is_some(), bitmap.is_some());
        let mut message = Self {
            indicator: Indicator { total_length: 0 },
            product_definition,
            grid_description,
            bitmap,
            binary_data,
            sections: Box::new([]),
        };
        let (buf, sections) = message.encode();
        message.indicator.total_length = u32::try_from(buf.len()).unwrap_or(u32::MAX);
        message.sections = sections.into_boxed_slice();
        message
    }

    fn encode(&self) -> (Vec<u8>, Vec<SectionInfo>) {
        let kinds = [
            SectionKind::Indicator,
            SectionKind::ProductDefinition,
            SectionKind::GridDescription,
            SectionKind::Bitmap,
            SectionKind::BinaryData,
            SectionKind::End,
        ];

        let mut buf = Vec::new();
        let mut sections = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let offset = buf.len();
            match kind {
                SectionKind::Indicator => self.indicator.write_to(&mut buf),
                SectionKind::ProductDefinition => self.product_definition.write_to(&mut buf),
                SectionKind::GridDescription => match &self.grid_description {
                    Some(gd) => gd.write_to(&mut buf),
                    None => continue,
                },
                SectionKind::Bitmap => match &self.bitmap {
                    Some(bitmap) => bitmap.write_to(&mut buf),
                    None => continue,
                },
                SectionKind::BinaryData => self.binary_data.write_to(&mut buf),
                SectionKind::End => EndSection.write_to(&mut buf),
            }
            sections.push(SectionInfo {
                kind,
                offset,
                size: buf.len() - offset,
            });
        }

        (buf, sections)
    }

    /// Encodes the message.
    ///
    /// # Examples
    ///
    /// ```
    /// use grib1::{BinaryData, BinaryDataFlag, Message, ProductDefinition, Samples};
    ///
    /// fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let product_definition = ProductDefinition {
    ///         table2_version: 128,
    ///         centre: 98,
    ///         generating_process: 0,
    ///         grid_id: 255,
    ///         flags: 0,
    ///         indicator_of_parameter: 169,
    ///         level_type: 1,
    ///         level: 0,
    ///         year_of_century: 24,
    ///         month: 1,
    ///         day: 1,
    ///         hour: 0,
    ///         minute: 0,
    ///         unit_of_time: 1,
    ///         p1: 0,
    ///         p2: 0,
    ///         time_range_indicator: 0,
    ///         num_in_average: 0,
    ///         num_missing: 0,
    ///         century: 21,
    ///         sub_centre: 0,
    ///         decimal_scale_factor: 0,
    ///         local_use: Box::new([]),
    ///     };
    ///     let binary_data = BinaryData {
    ///         flag: BinaryDataFlag(0),
    ///         binary_scale_factor: 0,
    ///         reference_value: [0; 4],
    ///         bits_per_value: 32,
    ///         samples: Samples::Float(vec![1.0, 2.0].into_boxed_slice()),
    ///     };
    ///     let message = Message::from_parts(product_definition, None, None, binary_data);
    ///
    ///     let data = message.to_bytes()?;
    ///     assert_eq!(data.len(), 8 + 28 + 11 + 8 + 4);
    ///     assert_eq!(&data[..4], b"GRIB");
    ///     assert_eq!(Message::from_slice(&data)?, message);
    ///     Ok(())
    /// }
    /// ```
    pub fn to_bytes(&self) -> Result<Box<[u8]>, GribError> {
        let (mut buf, _) = self.encode();
        if buf.len() > MAX_MESSAGE_LENGTH {
            return Err(GribError::InvalidValueError(format!(
                "message length {} exceeds the maximum of {MAX_MESSAGE_LENGTH}",
                buf.len()
            )));
        }
        let length = (buf.len() as u32).to_be_bytes();
        buf[4..7].copy_from_slice(&length[1..]);
        Ok(buf.into_boxed_slice())
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    pub fn product_definition(&self) -> &ProductDefinition {
        &self.product_definition
    }

    pub fn grid_description(&self) -> Option<&GridDescription> {
        self.grid_description.as_ref()
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    pub fn binary_data(&self) -> &BinaryData {
        &self.binary_data
    }

    /// Returns the sections in wire order with offsets relative to the start
    /// of the message.
    pub fn sections(&self) -> &[SectionInfo] {
        &self.sections
    }

    pub fn total_length(&self) -> usize {
        self.indicator.total_length as usize
    }

    pub fn parameter(&self) -> Parameter {
        self.product_definition.parameter()
    }

    pub fn ref_time(&self) -> UtcDateTime {
        self.product_definition.ref_time()
    }

    pub fn forecast_time(&self) -> ForecastTime {
        self.product_definition.forecast_time()
    }

    /// Returns the latitude/longitude grid, if the message has a grid
    /// description of that type.
    pub fn latlon_grid(&self) -> Option<&LatLonGrid> {
        self.grid_description.as_ref().and_then(|gd| gd.latlon())
    }

    /// Number of grid points, if known without decoding.
    pub fn num_points(&self) -> Option<usize> {
        self.latlon_grid()
            .map(|grid| grid.num_points())
            .or_else(|| self.bitmap.as_ref().map(|bitmap| bitmap.num_bits()))
    }

    /// Decodes the values in grid order, with NaN for points missing in the
    /// bit-map.
    pub fn values(&self) -> Result<Box<[f32]>, GribError> {
        decoder::dispatch(
            &self.product_definition,
            self.grid_description.as_ref(),
            self.bitmap.as_ref(),
            &self.binary_data,
        )
    }

    /// Returns an iterator over grid points in the order of values.
    pub fn latlons(&self) -> Result<GridPointIterator, GribError> {
        let gd = self
            .grid_description
            .as_ref()
            .ok_or(DecodeError::NoGridDescription)?;
        let grid = gd
            .latlon()
            .ok_or(DecodeError::UnsupportedProjection(gd.data_representation_type))?;
        Ok(grid.points())
    }

    /// Decodes values together with their positions.
    pub fn latlons_and_values(&self) -> Result<Vec<GridValue>, GribError> {
        let points = self.latlons()?;
        let values = self.values()?;
        let zipped = points
            .zip(values.iter())
            .map(|(point, value)| {
                let (latitude, longitude) = point.degrees();
                GridValue {
                    latitude,
                    longitude,
                    value: *value,
                }
            })
            .collect();
        Ok(zipped)
    }

    /// Returns a multi-line description of the message.
    pub fn describe(&self) -> String {
        let pd = &self.product_definition;
        let (unit, time_range) = pd.forecast_time().describe();
        let grid = match &self.grid_description {
            Some(gd) => format!("{} ({})", gd.short_name(), gd.data_representation_type),
            None => "none".to_owned(),
        };
        let num_points = self
            .num_points()
            .map_or_else(|| "unknown".to_owned(), |n| n.to_string());
        let bitmap = match &self.bitmap {
            Some(bitmap) => format!("{} of {} points present", bitmap.count_ones(), bitmap.num_bits()),
            None => "none".to_owned(),
        };

        format!(
            "\
Grid:                                   {}
  Number of points:                     {}
Product:                                {}
  Parameter Table Version:              {}
  Originating Centre:                   {}
  Sub-centre:                           {}
  Generating Process:                   {}
  Level Type:                           {}
  Level:                                {}
  Reference Time:                       {}
  Forecast Time:                        {}
  Forecast Time Unit:                   {}
  Time Range:                           {}
Bit-map:                                {}
Data Representation:
  Reference Value:                      {}
  Binary Scale Factor:                  {}
  Decimal Scale Factor:                 {}
  Bits per Value:                       {}
",
            grid,
            num_points,
            pd.parameter(),
            pd.table2_version,
            pd.centre,
            pd.sub_centre,
            pd.generating_process,
            pd.level_type,
            pd.level,
            pd.ref_time(),
            pd.forecast_time(),
            unit,
            time_range,
            bitmap,
            self.binary_data.reference_value(),
            self.binary_data.binary_scale_factor,
            pd.decimal_scale_factor,
            self.binary_data.bits_per_value,
        )
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let parameter = self.parameter();
        write!(
            f,
            "indicator of parameter = {}; table2Version = {}",
            parameter.reference_url(),
            parameter.table_version
        )?;
        if let Some(gd) = &self.grid_description {
            write!(f, " datarep = {}", gd.data_representation_type)?;
        }
        if let Some(description) = parameter.description() {
            write!(f, " ({description})")?;
        }
        Ok(())
    }
}

/// A decoded value and the position of its grid point, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridValue {
    pub latitude: f64,
    pub longitude: f64,
    pub value: f32,
}
