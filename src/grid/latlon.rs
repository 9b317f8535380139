use std::{
    fmt::{self, Display, Formatter},
    iter::FusedIterator,
};

use super::{ResolutionFlags, ScanningMode};
use crate::helpers::{grib_int_from_bytes, grib_int_to_bytes, read_as};

const FULL_CIRCLE: i32 = 360_000;

/// A latitude or longitude in thousandths of a degree, the unit GRIB1 uses
/// for grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct QuantizedAngle(pub i32);

impl QuantizedAngle {
    pub fn from_milli_degrees(milli_degrees: i32) -> Self {
        Self(milli_degrees)
    }

    pub fn milli_degrees(&self) -> i32 {
        self.0
    }

    /// Returns the angle in degrees.
    ///
    /// # Examples
    ///
    /// ```
    /// assert_eq!(grib1::QuantizedAngle(-90_000).degrees(), -90.0);
    /// assert_eq!(grib1::QuantizedAngle(1_250).degrees(), 1.25);
    /// ```
    pub fn degrees(&self) -> f64 {
        f64::from(self.0) / 1000.0
    }

    pub fn plus(&self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    fn negated(&self) -> Self {
        Self(self.0.saturating_neg())
    }

    fn times(&self, n: usize) -> Self {
        let n = i32::try_from(n).unwrap_or(i32::MAX);
        Self(self.0.saturating_mul(n))
    }
}

impl Display for QuantizedAngle {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:.3}", self.degrees())
    }
}

/// A grid point position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LatLng {
    pub lat: QuantizedAngle,
    pub lng: QuantizedAngle,
}

impl LatLng {
    pub fn new(lat: QuantizedAngle, lng: QuantizedAngle) -> Self {
        Self { lat, lng }
    }

    /// Creates a point from latitude and longitude in thousandths of a
    /// degree.
    pub fn from_milli_degrees(lat: i32, lng: i32) -> Self {
        Self::new(QuantizedAngle(lat), QuantizedAngle(lng))
    }

    pub fn plus(&self, other: Self) -> Self {
        Self {
            lat: self.lat.plus(other.lat),
            lng: self.lng.plus(other.lng),
        }
    }

    /// Returns `(latitude, longitude)` in degrees.
    pub fn degrees(&self) -> (f64, f64) {
        (self.lat.degrees(), self.lng.degrees())
    }
}

impl Display for LatLng {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// Latitude/longitude grid (data representation type 0).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LatLonGrid {
    /// Ni, number of points along a parallel
    pub ni: u16,
    /// Nj, number of points along a meridian
    pub nj: u16,
    pub first_point: LatLng,
    pub resolution_flags: ResolutionFlags,
    pub last_point: LatLng,
    /// Di, i direction increment in millidegrees, without sign
    pub i_increment: u16,
    /// Dj, j direction increment in millidegrees, without sign
    pub j_increment: u16,
    pub scanning_mode: ScanningMode,
    /// Octets 29 and following of the section.
    pub remainder: Box<[u8]>,
}

impl LatLonGrid {
    const SIZE: usize = 22;
    const MISSING_INCREMENT: u16 = u16::MAX;

    /// Creates a grid whose increments are given and equal to the distance
    /// between the first and last points divided by the number of intervals.
    ///
    /// # Examples
    ///
    /// ```
    /// use grib1::{LatLng, LatLonGrid, ScanningMode};
    ///
    /// let grid = LatLonGrid::new(
    ///     3,
    ///     2,
    ///     LatLng::from_milli_degrees(36_000, 135_000),
    ///     LatLng::from_milli_degrees(35_000, 137_000),
    ///     ScanningMode(0b00000000),
    /// );
    /// assert_eq!((grid.i_increment, grid.j_increment), (1_000, 1_000));
    /// assert_eq!(grid.grid_shape(), (3, 2));
    /// ```
    pub fn new(
        ni: u16,
        nj: u16,
        first_point: LatLng,
        last_point: LatLng,
        scanning_mode: ScanningMode,
    ) -> Self {
        let mut grid = Self {
            ni,
            nj,
            first_point,
            resolution_flags: ResolutionFlags(0b10000000),
            last_point,
            i_increment: 0,
            j_increment: 0,
            scanning_mode,
            remainder: vec![0; 4].into_boxed_slice(),
        };
        let (di, dj) = grid.derived_increments();
        grid.i_increment = u16::try_from(di).unwrap_or(Self::MISSING_INCREMENT);
        grid.j_increment = u16::try_from(dj).unwrap_or(Self::MISSING_INCREMENT);
        grid
    }

    /// Decodes octets 7 and following of a Grid Description Section.
    ///
    /// Callers check that `buf` holds at least 22 octets.
    pub(crate) fn from_buf(buf: &[u8]) -> Self {
        Self {
            ni: read_as!(u16, buf, 0),
            nj: read_as!(u16, buf, 2),
            first_point: LatLng::from_milli_degrees(
                grib_int_from_bytes(&buf[4..7]),
                grib_int_from_bytes(&buf[7..10]),
            ),
            resolution_flags: ResolutionFlags(buf[10]),
            last_point: LatLng::from_milli_degrees(
                grib_int_from_bytes(&buf[11..14]),
                grib_int_from_bytes(&buf[14..17]),
            ),
            i_increment: read_as!(u16, buf, 17),
            j_increment: read_as!(u16, buf, 19),
            scanning_mode: ScanningMode(buf[21]),
            remainder: buf[Self::SIZE..].into(),
        }
    }

    pub(crate) fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.ni.to_be_bytes());
        buf.extend_from_slice(&self.nj.to_be_bytes());
        buf.extend(grib_int_to_bytes(self.first_point.lat.0, 3));
        buf.extend(grib_int_to_bytes(self.first_point.lng.0, 3));
        buf.push(self.resolution_flags.0);
        buf.extend(grib_int_to_bytes(self.last_point.lat.0, 3));
        buf.extend(grib_int_to_bytes(self.last_point.lng.0, 3));
        buf.extend_from_slice(&self.i_increment.to_be_bytes());
        buf.extend_from_slice(&self.j_increment.to_be_bytes());
        buf.push(self.scanning_mode.0);
        buf.extend_from_slice(&self.remainder);
    }

    /// Returns the shape of the grid, i.e. a tuple of the number of grids in
    /// the i and j directions.
    pub fn grid_shape(&self) -> (usize, usize) {
        (usize::from(self.ni), usize::from(self.nj))
    }

    pub fn num_points(&self) -> usize {
        usize::from(self.ni) * usize::from(self.nj)
    }

    pub fn short_name(&self) -> &'static str {
        "regular_ll"
    }

    pub fn resolution_flags(&self) -> ResolutionFlags {
        self.resolution_flags
    }

    pub fn scanning_mode(&self) -> ScanningMode {
        self.scanning_mode
    }

    /// Checks that the order of the first and last points agrees with the
    /// scanning directions.
    pub fn is_consistent(&self) -> bool {
        let lat_diff = self.last_point.lat.0 - self.first_point.lat.0;
        let lon_diff = self.last_point.lng.0 - self.first_point.lng.0;
        let j_ok = lat_diff == 0 || (lat_diff > 0) == self.scanning_mode.scans_positively_for_j();
        let i_ok = lon_diff == 0 || (lon_diff > 0) == self.scanning_mode.scans_positively_for_i();
        j_ok && i_ok
    }

    /// Returns the i and j increments with signs following the scanning
    /// directions.
    ///
    /// Increments not given in the section are derived from the first and
    /// last points.
    pub fn increments(&self) -> (QuantizedAngle, QuantizedAngle) {
        let (derived_di, derived_dj) = self.derived_increments();
        let given = self.resolution_flags.increments_given();
        let di = match self.i_increment {
            d if given && d != Self::MISSING_INCREMENT => i32::from(d),
            _ => derived_di,
        };
        let dj = match self.j_increment {
            d if given && d != Self::MISSING_INCREMENT => i32::from(d),
            _ => derived_dj,
        };

        let mut di = QuantizedAngle(di);
        let mut dj = QuantizedAngle(dj);
        if !self.scanning_mode.scans_positively_for_i() {
            di = di.negated();
        }
        if !self.scanning_mode.scans_positively_for_j() {
            dj = dj.negated();
        }
        (di, dj)
    }

    fn derived_increments(&self) -> (i32, i32) {
        let mut lon_span = self.last_point.lng.0 - self.first_point.lng.0;
        // Grids crossing the meridian where longitudes wrap around.
        if self.scanning_mode.scans_positively_for_i() && lon_span < 0 {
            lon_span += FULL_CIRCLE;
        } else if !self.scanning_mode.scans_positively_for_i() && lon_span > 0 {
            lon_span -= FULL_CIRCLE;
        }
        let lat_span = self.last_point.lat.0 - self.first_point.lat.0;

        let per_interval = |span: i32, n: u16| {
            if n > 1 {
                span.abs() / (i32::from(n) - 1)
            } else {
                0
            }
        };
        (per_interval(lon_span, self.ni), per_interval(lat_span, self.nj))
    }

    /// Returns an iterator over grid points in the order values are stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use grib1::{LatLng, LatLonGrid, ScanningMode};
    ///
    /// let grid = LatLonGrid::new(
    ///     2,
    ///     2,
    ///     LatLng::from_milli_degrees(0, 0),
    ///     LatLng::from_milli_degrees(1_000, 1_000),
    ///     ScanningMode(0b01000000),
    /// );
    /// let points = grid.points().map(|p| p.degrees()).collect::<Vec<_>>();
    /// assert_eq!(points, vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]);
    /// ```
    pub fn points(&self) -> GridPointIterator {
        let (i_increment, j_increment) = self.increments();
        GridPointIterator {
            ni: usize::from(self.ni),
            nj: usize::from(self.nj),
            first_point: self.first_point,
            i_increment,
            j_increment,
            i_consecutive: self.scanning_mode.is_consecutive_for_i(),
            pos: 0,
            len: self.num_points(),
        }
    }
}

/// An iterator over positions of grid points of a lat/lon grid.
///
/// This `struct` is created by the [`points`] method on [`LatLonGrid`].
///
/// [`points`]: LatLonGrid::points
#[derive(Debug, Clone)]
pub struct GridPointIterator {
    ni: usize,
    nj: usize,
    first_point: LatLng,
    i_increment: QuantizedAngle,
    j_increment: QuantizedAngle,
    i_consecutive: bool,
    pos: usize,
    len: usize,
}

impl Iterator for GridPointIterator {
    type Item = LatLng;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.len {
            return None;
        }

        let (i, j) = if self.i_consecutive {
            (self.pos % self.ni, self.pos / self.ni)
        } else {
            (self.pos / self.nj, self.pos % self.nj)
        };
        self.pos += 1;

        let offset = LatLng::new(self.j_increment.times(j), self.i_increment.times(i));
        Some(self.first_point.plus(offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.len - self.pos;
        (size, Some(size))
    }
}

impl ExactSizeIterator for GridPointIterator {}

impl FusedIterator for GridPointIterator {}
