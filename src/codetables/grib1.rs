use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Code table 4: unit of time.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Table4 {
    Minute = 0,
    Hour,
    Day,
    Month,
    Year,
    Decade,
    Normal,
    Century,
    ThreeHours = 10,
    SixHours,
    TwelveHours,
    FifteenMinutes,
    ThirtyMinutes,
    Second = 254,
}

impl Table4 {
    pub fn short_expr(&self) -> &'static str {
        match self {
            Self::Minute => "m",
            Self::Hour => "h",
            Self::Day => "D",
            Self::Month => "M",
            Self::Year => "Y",
            Self::Decade => "10Y",
            Self::Normal => "30Y",
            Self::Century => "C",
            Self::ThreeHours => "3h",
            Self::SixHours => "6h",
            Self::TwelveHours => "12h",
            Self::FifteenMinutes => "15m",
            Self::ThirtyMinutes => "30m",
            Self::Second => "s",
        }
    }
}

/// Code table 5: time range indicator.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Table5 {
    ForecastAtP1 = 0,
    InitializedAnalysis,
    ValidBetweenP1AndP2,
    Average,
    Accumulation,
    Difference,
    ForecastAtLongP1 = 10,
    AverageOfForecastsAtIntervals = 113,
    AccumulationOfForecastsAtIntervals,
    AverageOfForecastsWithSameReferenceTime,
    AccumulationOfForecastsWithSameReferenceTime,
    AverageOfForecastsWithSameValidTime,
    TemporalVarianceOfAnalyses,
    AverageOfUninitializedAnalyses = 123,
    AccumulationOfUninitializedAnalyses,
}

impl Table5 {
    pub fn description(&self) -> &'static str {
        match self {
            Self::ForecastAtP1 => "Forecast product valid at reference time + P1",
            Self::InitializedAnalysis => "Initialized analysis product for reference time",
            Self::ValidBetweenP1AndP2 => {
                "Product valid between reference time + P1 and reference time + P2"
            }
            Self::Average => "Average (reference time + P1 to reference time + P2)",
            Self::Accumulation => "Accumulation (reference time + P1 to reference time + P2)",
            Self::Difference => "Difference (reference time + P2 minus reference time + P1)",
            Self::ForecastAtLongP1 => {
                "Product valid at reference time + P1, P1 occupying octets 19 and 20"
            }
            Self::AverageOfForecastsAtIntervals => {
                "Average of N forecasts with reference times at intervals of P2"
            }
            Self::AccumulationOfForecastsAtIntervals => {
                "Accumulation of N forecasts with reference times at intervals of P2"
            }
            Self::AverageOfForecastsWithSameReferenceTime => {
                "Average of N forecasts, all with the same reference time"
            }
            Self::AccumulationOfForecastsWithSameReferenceTime => {
                "Accumulation of N forecasts, all with the same reference time"
            }
            Self::AverageOfForecastsWithSameValidTime => {
                "Average of N forecasts, all with the same valid time"
            }
            Self::TemporalVarianceOfAnalyses => {
                "Temporal variance, or covariance, of N initialized analyses"
            }
            Self::AverageOfUninitializedAnalyses => {
                "Average of N uninitialized analyses at intervals of P2"
            }
            Self::AccumulationOfUninitializedAnalyses => {
                "Accumulation of N uninitialized analyses at intervals of P2"
            }
        }
    }
}

/// Code table 6: data representation type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Table6 {
    LatLon = 0,
    Mercator,
    Gnomonic,
    LambertConformal,
    Gaussian,
    PolarStereographic,
    UniversalTransverseMercator,
    SimplePolyconic,
    AlbersEqualArea,
    MillerCylindrical,
    RotatedLatLon,
    ObliqueLambertConformal = 13,
    RotatedGaussian,
    StretchedLatLon = 20,
    StretchedGaussian = 24,
    StretchedRotatedLatLon = 30,
    StretchedRotatedGaussian = 34,
    SphericalHarmonics = 50,
    RotatedSphericalHarmonics = 60,
    StretchedSphericalHarmonics = 70,
    StretchedRotatedSphericalHarmonics = 80,
    SpaceView = 90,
}

impl Table6 {
    /// Returns the grid type name used by common GRIB tools.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::LatLon => "regular_ll",
            Self::Mercator => "mercator",
            Self::Gnomonic => "gnomonic",
            Self::LambertConformal => "lambert",
            Self::Gaussian => "regular_gg",
            Self::PolarStereographic => "polar_stereographic",
            Self::UniversalTransverseMercator => "utm",
            Self::SimplePolyconic => "polyconic",
            Self::AlbersEqualArea => "albers",
            Self::MillerCylindrical => "miller",
            Self::RotatedLatLon => "rotated_ll",
            Self::ObliqueLambertConformal => "lambert_oblique",
            Self::RotatedGaussian => "rotated_gg",
            Self::StretchedLatLon => "stretched_ll",
            Self::StretchedGaussian => "stretched_gg",
            Self::StretchedRotatedLatLon => "stretched_rotated_ll",
            Self::StretchedRotatedGaussian => "stretched_rotated_gg",
            Self::SphericalHarmonics => "sh",
            Self::RotatedSphericalHarmonics => "rotated_sh",
            Self::StretchedSphericalHarmonics => "stretched_sh",
            Self::StretchedRotatedSphericalHarmonics => "stretched_rotated_sh",
            Self::SpaceView => "space_view",
        }
    }
}

/// Parameters of the ECMWF local table 128 that this crate can name.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum KnownParameter {
    TenMetreUWind = 165,
    TenMetreVWind = 166,
    SurfaceSolarRadiationDownwards = 169,
}

impl KnownParameter {
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::TenMetreUWind => "10u",
            Self::TenMetreVWind => "10v",
            Self::SurfaceSolarRadiationDownwards => "ssrd",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::TenMetreUWind => "Eastward component of the 10m wind",
            Self::TenMetreVWind => "Northward component of the 10m wind",
            Self::SurfaceSolarRadiationDownwards => "Surface solar radiation downwards",
        }
    }
}
