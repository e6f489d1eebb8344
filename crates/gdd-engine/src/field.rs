//! Labeled gridded fields.
//!
//! Three shapes flow through the pipeline:
//! - [`GriddedField`]: `(day, lat, lon)` daily values
//! - [`SeasonalField`]: `(year, lat, lon)` seasonal sums
//! - [`Climatology`]: `(lat, lon)` multi-year mean
//!
//! Every operation returns a new field; inputs are never mutated.

use std::fmt;

use chrono::NaiveDate;
use gdd_common::{CoordAxis, GddError, GddResult};
use ndarray::{Array2, Array3};

/// Physical units carried by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Kelvin,
    Celsius,
    /// Growing degree days (°C·day)
    DegreeDays,
}

impl Units {
    /// Interpret a CF `units` attribute. Unknown strings are assumed to be
    /// Kelvin, which is what the daily temperature products store.
    pub fn from_attribute(units: Option<&str>) -> Self {
        match units.map(|u| u.trim().to_lowercase()) {
            Some(u) if u == "degc" || u == "c" || u == "celsius" || u == "degree_celsius" => {
                Units::Celsius
            }
            _ => Units::Kelvin,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Kelvin => write!(f, "K"),
            Units::Celsius => write!(f, "degC"),
            Units::DegreeDays => write!(f, "GDD"),
        }
    }
}

/// A `(day, lat, lon)` field with coordinate labels.
#[derive(Debug, Clone, PartialEq)]
pub struct GriddedField {
    name: String,
    units: Units,
    days: Vec<NaiveDate>,
    lat: CoordAxis,
    lon: CoordAxis,
    values: Array3<f64>,
}

impl GriddedField {
    /// Build a field, checking that the labels match the array shape.
    pub fn new(
        name: impl Into<String>,
        units: Units,
        days: Vec<NaiveDate>,
        lat: CoordAxis,
        lon: CoordAxis,
        values: Array3<f64>,
    ) -> GddResult<Self> {
        let name = name.into();
        let expected = (days.len(), lat.len(), lon.len());
        if values.dim() != expected {
            return Err(GddError::ShapeMismatch {
                left: format!("{} labels {:?}", name, expected),
                right: format!("values {:?}", values.dim()),
            });
        }
        Ok(Self {
            name,
            units,
            days,
            lat,
            lon,
            values,
        })
    }

    /// Build from a flat row-major `(day, lat, lon)` buffer.
    pub fn from_flat(
        name: impl Into<String>,
        units: Units,
        days: Vec<NaiveDate>,
        lat: CoordAxis,
        lon: CoordAxis,
        data: Vec<f64>,
    ) -> GddResult<Self> {
        let name = name.into();
        let shape = (days.len(), lat.len(), lon.len());
        let values = Array3::from_shape_vec(shape, data)
            .map_err(|e| GddError::DataAccess(format!("{}: {}", name, e)))?;
        Self::new(name, units, days, lat, lon, values)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn lat(&self) -> &CoordAxis {
        &self.lat
    }

    pub fn lon(&self) -> &CoordAxis {
        &self.lon
    }

    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    /// Dimension sizes as `(day, lat, lon)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        self.values.dim()
    }

    /// Same labels, new values and metadata.
    pub(crate) fn with_values(&self, name: &str, units: Units, values: Array3<f64>) -> Self {
        debug_assert_eq!(values.dim(), self.values.dim());
        Self {
            name: name.to_string(),
            units,
            days: self.days.clone(),
            lat: self.lat.clone(),
            lon: self.lon.clone(),
            values,
        }
    }

    /// Whether two fields share identical day/lat/lon labels.
    pub fn same_grid(&self, other: &GriddedField) -> bool {
        self.days == other.days && self.lat == other.lat && self.lon == other.lon
    }
}

/// Seasonal sums indexed by `(year, lat, lon)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalField {
    pub years: Vec<i32>,
    pub lat: CoordAxis,
    pub lon: CoordAxis,
    pub values: Array3<f64>,
}

impl SeasonalField {
    /// Dimension sizes as `(year, lat, lon)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        self.values.dim()
    }
}

/// Multi-year mean of the seasonal sums, `(lat, lon)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Climatology {
    pub lat: CoordAxis,
    pub lon: CoordAxis,
    pub values: Array2<f64>,
}

impl Climatology {
    /// Dimension sizes as `(lat, lon)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Largest finite value, ignoring NaN.
    pub fn nan_max(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}
