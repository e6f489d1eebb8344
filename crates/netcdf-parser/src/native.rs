//! Native NetCDF reading using the netcdf library.
//!
//! Reads one daily temperature variable laid out as `(day, lat, lon)` together
//! with its coordinate variables, unpacking `scale_factor`/`add_offset` and
//! mapping fill values to NaN.

use std::ops::Range;
use std::path::Path;
use std::sync::Once;

use chrono::NaiveDate;
use gdd_common::CoordAxis;
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::time::CfTimeUnits;
use crate::{ReadWindow, TemperatureGrid};

/// Accepted names for the leading time dimension.
const TIME_DIMENSIONS: [&str; 2] = ["day", "time"];

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// Safe to call multiple times; only the first call has an effect.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Load a whole `(day, lat, lon)` temperature variable from a NetCDF file.
///
/// The variable's dimensions must be named `day` (or `time`), `lat` and `lon`,
/// in that order, and each must have a coordinate variable of the same name.
pub fn load_temperature_grid<P: AsRef<Path>>(
    path: P,
    variable: &str,
) -> NetCdfResult<TemperatureGrid> {
    load_temperature_window(path, variable, &ReadWindow::all())
}

/// Load only the cells of a temperature variable that fall inside `window`.
///
/// Coordinates and the time axis are read in full (they are small); the data
/// variable is read as a single hyperslab. A window that matches nothing on
/// an axis fails with [`NetCdfError::EmptySelection`].
pub fn load_temperature_window<P: AsRef<Path>>(
    path: P,
    variable: &str,
    window: &ReadWindow,
) -> NetCdfResult<TemperatureGrid> {
    let path = path.as_ref();
    silence_hdf5_errors();

    if !path.exists() {
        return Err(NetCdfError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }

    let nc_file = netcdf::open(path).map_err(|e| {
        NetCdfError::InvalidFormat(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let var = nc_file
        .variable(variable)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", variable)))?;

    let dim_names: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
    let time_dim = match dim_names.as_slice() {
        [t, lat, lon] if TIME_DIMENSIONS.contains(&t.as_str()) && lat == "lat" && lon == "lon" => {
            t.clone()
        }
        _ => {
            return Err(NetCdfError::InvalidFormat(format!(
                "{} has dimensions {:?}, expected (day, lat, lon)",
                variable, dim_names
            )))
        }
    };

    let lat = read_coordinate(&nc_file, "lat")?;
    let lon = read_coordinate(&nc_file, "lon")?;

    let time_var = nc_file
        .variable(&time_dim)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", time_dim)))?;
    let time_units = get_str_attr(&time_var, "units")
        .ok_or_else(|| NetCdfError::MissingData(format!("{}:units attribute", time_dim)))?;
    let offsets: Vec<f64> = time_var
        .get_values(..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", time_dim, e)))?;
    let days = CfTimeUnits::parse(&time_units)?.decode(&offsets)?;

    let day_range = date_range(&days, window.dates)?;
    let (lat_range, lon_range) = match window.bbox {
        Some(bbox) => (
            coordinate_range("lat", &lat, bbox.min_y, bbox.max_y)?,
            coordinate_range("lon", &lon, bbox.min_x, bbox.max_x)?,
        ),
        None => (0..lat.len(), 0..lon.len()),
    };

    // Packed values come back as f64; the library converts integer storage types.
    let mut data: Vec<f64> = var
        .get_values((day_range.clone(), lat_range.clone(), lon_range.clone()))
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", variable, e)))?;

    let expected = day_range.len() * lat_range.len() * lon_range.len();
    if data.len() != expected {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} has {} values in the window, expected {}",
            variable,
            data.len(),
            expected
        )));
    }

    let scale_factor = get_f64_attr(&var, "scale_factor").unwrap_or(1.0);
    let add_offset = get_f64_attr(&var, "add_offset").unwrap_or(0.0);
    let fill_value = get_f64_attr(&var, "_FillValue");
    let missing_value = get_f64_attr(&var, "missing_value");

    unpack_in_place(&mut data, scale_factor, add_offset, fill_value, missing_value);

    let units = get_str_attr(&var, "units");
    debug!(
        path = %path.display(),
        variable = variable,
        days = ?day_range,
        lat = ?lat_range,
        lon = ?lon_range,
        scale_factor = scale_factor,
        add_offset = add_offset,
        units = ?units,
        "Loaded temperature window"
    );

    Ok(TemperatureGrid {
        variable: variable.to_string(),
        units,
        days: days[day_range].to_vec(),
        lat: lat[lat_range].to_vec(),
        lon: lon[lon_range].to_vec(),
        data,
    })
}

/// Apply CF packing attributes, mapping fill/missing markers to NaN.
pub fn unpack_in_place(
    values: &mut [f64],
    scale_factor: f64,
    add_offset: f64,
    fill_value: Option<f64>,
    missing_value: Option<f64>,
) {
    for val in values.iter_mut() {
        *val = if val.is_nan() || Some(*val) == fill_value || Some(*val) == missing_value {
            f64::NAN
        } else {
            *val * scale_factor + add_offset
        };
    }
}

/// Index range of `values` whose coordinates lie in `[lo, hi]`.
fn coordinate_range(name: &str, values: &[f64], lo: f64, hi: f64) -> NetCdfResult<Range<usize>> {
    let axis = CoordAxis::new(name, values.to_vec())
        .map_err(|e| NetCdfError::InvalidFormat(e.to_string()))?;
    let range = axis.slice_range(axis.slice_for_range(lo, hi));
    if range.is_empty() {
        return Err(NetCdfError::EmptySelection {
            axis: name.to_string(),
            message: format!("[{}, {}] matched no coordinates", lo, hi),
        });
    }
    Ok(range)
}

/// Index range of `days` inside the inclusive `dates` window.
fn date_range(
    days: &[NaiveDate],
    dates: Option<(NaiveDate, NaiveDate)>,
) -> NetCdfResult<Range<usize>> {
    let Some((first, last)) = dates else {
        return Ok(0..days.len());
    };
    if days.windows(2).any(|w| w[0] >= w[1]) {
        return Err(NetCdfError::InvalidFormat(
            "time axis is not strictly increasing".to_string(),
        ));
    }
    let start = days.partition_point(|d| *d < first);
    let stop = days.partition_point(|d| *d <= last);
    if start >= stop {
        return Err(NetCdfError::EmptySelection {
            axis: "day".to_string(),
            message: format!("{} to {} matched no days", first, last),
        });
    }
    Ok(start..stop)
}

fn read_coordinate(nc_file: &netcdf::File, name: &str) -> NetCdfResult<Vec<f64>> {
    let var = nc_file
        .variable(name)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} coordinate variable", name)))?;
    var.get_values(..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", name, e)))
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get f64 attribute.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

/// Helper to get string attribute.
fn get_str_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}
