use std::fmt::{self, Display, Formatter};

use crate::codetables::*;

/// Parameter of the product.
///
/// In GRIB1, the meaning of a parameter number depends on the parameter
/// table version and, for local tables, on the originating centre.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Parameter table version number.
    pub table_version: u8,
    /// Identification of originating/generating centre.
    pub centre: u8,
    /// Indicator of parameter.
    pub num: u8,
}

impl Parameter {
    /// Version number of the ECMWF local parameter table.
    pub const ECMWF_TABLE_VERSION: u8 = 128;

    /// Returns the known parameter this number stands for, if any.
    ///
    /// Only numbers from the ECMWF local table are looked up.
    ///
    /// # Examples
    ///
    /// ```
    /// let param = grib1::Parameter {
    ///     table_version: 128,
    ///     centre: 98,
    ///     num: 169,
    /// };
    /// assert_eq!(
    ///     param.known(),
    ///     Some(grib1::codetables::KnownParameter::SurfaceSolarRadiationDownwards)
    /// );
    /// ```
    pub fn known(&self) -> Option<KnownParameter> {
        if self.table_version != Self::ECMWF_TABLE_VERSION {
            return None;
        }
        KnownParameter::try_from(self.num).ok()
    }

    pub fn description(&self) -> Option<&'static str> {
        self.known().map(|p| p.description())
    }

    /// Returns the URL of the ECMWF parameter database entry for this number.
    pub fn reference_url(&self) -> String {
        format!(
            "https://apps.ecmwf.int/codes/grib/param-db/?id={}",
            self.num
        )
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.known() {
            Some(p) => write!(f, "{} ({})", p.short_name(), p.description()),
            None => write!(f, "{}:{}", self.table_version, self.num),
        }
    }
}

/// Forecast time fields of the product definition section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastTime {
    pub unit: Code<Table4, u8>,
    pub p1: u16,
    pub p2: u16,
    pub time_range: Code<Table5, u8>,
}

impl ForecastTime {
    /// Builds forecast time fields from raw octets 18 to 21.
    ///
    /// With time range indicator 10, P1 and P2 together form a single
    /// 2-octet P1.
    ///
    /// # Examples
    ///
    /// ```
    /// let ft = grib1::ForecastTime::from_numbers(1, 0x01, 0x02, 10);
    /// assert_eq!(ft.p1, 0x0102);
    /// assert_eq!(ft.p2, 0);
    /// ```
    pub fn from_numbers(unit: u8, p1: u8, p2: u8, time_range: u8) -> Self {
        let (p1, p2) = if time_range == 10 {
            ((u16::from(p1) << 8) | u16::from(p2), 0)
        } else {
            (u16::from(p1), u16::from(p2))
        };
        Self {
            unit: Code::from_number(unit),
            p1,
            p2,
            time_range: Code::from_number(time_range),
        }
    }

    pub fn describe(&self) -> (String, String) {
        let unit = match &self.unit {
            Name(unit) => format!("{unit:?}"),
            Num(num) => format!("code {num}"),
        };
        let range = match &self.time_range {
            Name(range) => range.description().to_owned(),
            Num(num) => format!("code {num}"),
        };
        (unit, range)
    }

    fn unit_suffix(&self) -> String {
        match &self.unit {
            Name(unit) => unit.short_expr().to_owned(),
            Num(num) => format!(" [unit: {num}]"),
        }
    }
}

impl Display for ForecastTime {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let suffix = self.unit_suffix();
        match &self.time_range {
            Name(Table5::ForecastAtP1) | Name(Table5::ForecastAtLongP1) => {
                write!(f, "{}{suffix}", self.p1)
            }
            Name(Table5::InitializedAnalysis) => write!(f, "analysis"),
            Name(Table5::ValidBetweenP1AndP2) => write!(f, "{}-{}{suffix}", self.p1, self.p2),
            Name(Table5::Average) => write!(f, "avg {}-{}{suffix}", self.p1, self.p2),
            Name(Table5::Accumulation) => write!(f, "acc {}-{}{suffix}", self.p1, self.p2),
            Name(Table5::Difference) => write!(f, "diff {}-{}{suffix}", self.p1, self.p2),
            _ => write!(
                f,
                "{} {}-{}{suffix}",
                self.time_range, self.p1, self.p2
            ),
        }
    }
}
