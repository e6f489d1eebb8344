//! Dataset loading: NetCDF temperature grids into labeled fields.

use std::path::Path;

use gdd_common::{CoordAxis, GddResult};
use netcdf_parser::{load_temperature_window, ReadWindow, TemperatureGrid};
use tracing::info;

use crate::field::{GriddedField, Units};

/// Open a daily temperature dataset and expose it as a `(day, lat, lon)` field.
///
/// Unreadable or malformed files surface as `GddError::DataAccess`.
pub fn load_field<P: AsRef<Path>>(path: P, variable: &str) -> GddResult<GriddedField> {
    load_field_window(path, variable, &ReadWindow::all())
}

/// Like [`load_field`], but reads only the cells inside `window`.
///
/// A window matching no coordinates fails with `GddError::EmptySelection`.
pub fn load_field_window<P: AsRef<Path>>(
    path: P,
    variable: &str,
    window: &ReadWindow,
) -> GddResult<GriddedField> {
    let path = path.as_ref();
    let grid = load_temperature_window(path, variable, window)?;
    info!(
        path = %path.display(),
        variable = variable,
        shape = ?grid.shape(),
        "Opened dataset"
    );
    field_from_grid(grid)
}

/// Attach coordinate labels to a raw grid.
pub fn field_from_grid(grid: TemperatureGrid) -> GddResult<GriddedField> {
    let units = Units::from_attribute(grid.units.as_deref());
    let lat = CoordAxis::new("lat", grid.lat)?;
    let lon = CoordAxis::new("lon", grid.lon)?;
    GriddedField::from_flat(grid.variable, units, grid.days, lat, lon, grid.data)
}
