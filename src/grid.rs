use std::fmt::{self, Display, Formatter};

pub use self::latlon::{GridPointIterator, LatLng, LatLonGrid, QuantizedAngle};

mod latlon;

/// Scanning mode flags (see Flag table 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanningMode(pub u8);

impl ScanningMode {
    /// Returns `true` if points of the first row or column scan in the `+i`
    /// (`+x`) direction.
    ///
    /// # Examples
    ///
    /// ```
    /// assert_eq!(grib1::ScanningMode(0b00000000).scans_positively_for_i(), true);
    /// assert_eq!(grib1::ScanningMode(0b10000000).scans_positively_for_i(), false);
    /// ```
    pub fn scans_positively_for_i(&self) -> bool {
        self.0 & 0b10000000 == 0
    }

    /// Returns `true` if points of the first row or column scan in the `+j`
    /// (`+y`) direction.
    ///
    /// # Examples
    ///
    /// ```
    /// assert_eq!(grib1::ScanningMode(0b00000000).scans_positively_for_j(), false);
    /// assert_eq!(grib1::ScanningMode(0b01000000).scans_positively_for_j(), true);
    /// ```
    pub fn scans_positively_for_j(&self) -> bool {
        self.0 & 0b01000000 != 0
    }

    /// Returns `true` if adjacent points in `i` (`x`) direction are
    /// consecutive.
    ///
    /// # Examples
    ///
    /// ```
    /// assert_eq!(grib1::ScanningMode(0b00000000).is_consecutive_for_i(), true);
    /// assert_eq!(grib1::ScanningMode(0b00100000).is_consecutive_for_i(), false);
    /// ```
    pub fn is_consecutive_for_i(&self) -> bool {
        self.0 & 0b00100000 == 0
    }

    /// Returns `true` if bits reserved in edition 1 are set.
    pub fn has_unsupported_flags(&self) -> bool {
        self.0 & 0b00011111 != 0
    }
}

impl Display for ScanningMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let i = if self.scans_positively_for_i() { "+i" } else { "-i" };
        let j = if self.scans_positively_for_j() { "+j" } else { "-j" };
        let consecutive = if self.is_consecutive_for_i() { "i" } else { "j" };
        write!(
            f,
            "{:#010b} ({i}, {j}, {consecutive} consecutive)",
            self.0
        )
    }
}

/// Resolution and component flags (see Flag table 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolutionFlags(pub u8);

impl ResolutionFlags {
    pub fn increments_given(&self) -> bool {
        self.0 & 0b10000000 != 0
    }

    /// Returns `true` if the earth is assumed to be an oblate spheroid rather
    /// than spherical.
    pub fn is_earth_oblate(&self) -> bool {
        self.0 & 0b01000000 != 0
    }

    /// Returns `true` if u- and v-components of vectors are resolved relative
    /// to the grid rather than to easterly and northerly directions.
    pub fn has_grid_relative_components(&self) -> bool {
        self.0 & 0b00001000 != 0
    }
}
