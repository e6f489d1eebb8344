//! NetCDF reader for daily gridded temperature products (gridMET and similar).
//!
//! This crate reads NetCDF-3/4 files through the `netcdf` crate (libnetcdf +
//! HDF5). It understands one layout: a temperature variable indexed by
//! `(day, lat, lon)` with matching coordinate variables and a CF time axis.
//!
//! # gridMET Data Structure
//!
//! gridMET daily minimum/maximum temperature files (`tmmn_YYYY.nc`,
//! `tmmx_YYYY.nc`) hold `air_temperature` in Kelvin, packed as unsigned
//! shorts with `scale_factor = 0.1` and `add_offset = 220`. Latitude is
//! stored north to south. The loader unpacks values and leaves coordinate
//! order untouched; callers detect axis direction themselves.
//!
//! A full CONUS record is far larger than memory, so reads go through a
//! [`ReadWindow`]: only the hyperslab covering the bounding box and date
//! range is requested from the library.

pub mod error;
pub mod native;
pub mod time;

use chrono::NaiveDate;
use gdd_common::BoundingBox;

pub use error::{NetCdfError, NetCdfResult};
pub use native::{load_temperature_grid, load_temperature_window, silence_hdf5_errors};
pub use time::{CfTimeUnits, TimeUnit};

/// A daily temperature grid as read from disk.
#[derive(Debug, Clone)]
pub struct TemperatureGrid {
    /// Variable name the data was read from
    pub variable: String,
    /// `units` attribute, if present (normally "K")
    pub units: Option<String>,
    /// Decoded calendar dates of the time axis
    pub days: Vec<NaiveDate>,
    /// Latitude coordinates in stored order
    pub lat: Vec<f64>,
    /// Longitude coordinates in stored order
    pub lon: Vec<f64>,
    /// Unpacked values, row-major `(day, lat, lon)`; fill values are NaN
    pub data: Vec<f64>,
}

impl TemperatureGrid {
    /// Dimension sizes as `(day, lat, lon)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.days.len(), self.lat.len(), self.lon.len())
    }
}

/// The part of a dataset to read.
///
/// `None` on either field reads that dimension in full.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReadWindow {
    /// Cells whose lat/lon fall inside the box, in stored order
    pub bbox: Option<BoundingBox>,
    /// Inclusive `(first, last)` date range
    pub dates: Option<(NaiveDate, NaiveDate)>,
}

impl ReadWindow {
    /// The whole variable.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(bbox: BoundingBox, first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            bbox: Some(bbox),
            dates: Some((first, last)),
        }
    }
}
