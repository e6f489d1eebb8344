//! Tests for loading daily temperature grids from NetCDF files.
//!
//! Files are written into a temp directory with the netcdf crate, so these
//! tests need libnetcdf but no downloaded data.

use std::path::Path;

use chrono::NaiveDate;
use gdd_common::BoundingBox;
use netcdf_parser::{load_temperature_grid, load_temperature_window, NetCdfError, ReadWindow};
use test_utils::assert_approx_eq;
use test_utils::fixtures::{bbox, temps};
use test_utils::temp_test_dir;

const DAY_UNITS: &str = "days since 1900-01-01 00:00:00";
/// 1991-01-01 in gridMET's day axis
const JAN_1_1991: f64 = 33237.0;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn unpacked(raw: i16) -> f64 {
    raw as f64 * temps::GRIDMET_SCALE + temps::GRIDMET_OFFSET
}

/// Write a gridMET-like file packed as shorts.
fn write_packed_file(
    path: &Path,
    var_name: &str,
    dims: &[&str],
    days: &[f64],
    lat: &[f64],
    lon: &[f64],
    raw: &[i16],
) {
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("day", days.len()).unwrap();
    file.add_dimension("lat", lat.len()).unwrap();
    file.add_dimension("lon", lon.len()).unwrap();

    let mut day = file.add_variable::<f64>("day", &["day"]).unwrap();
    day.put_attribute("units", DAY_UNITS).unwrap();
    day.put_values(days, ..).unwrap();

    let mut lat_var = file.add_variable::<f64>("lat", &["lat"]).unwrap();
    lat_var.put_values(lat, ..).unwrap();

    let mut lon_var = file.add_variable::<f64>("lon", &["lon"]).unwrap();
    lon_var.put_values(lon, ..).unwrap();

    let mut var = file.add_variable::<i16>(var_name, dims).unwrap();
    var.put_attribute("scale_factor", temps::GRIDMET_SCALE).unwrap();
    var.put_attribute("add_offset", temps::GRIDMET_OFFSET).unwrap();
    var.put_attribute("_FillValue", temps::GRIDMET_FILL as i16).unwrap();
    var.put_attribute("units", "K").unwrap();
    var.put_values(raw, ..).unwrap();
}

/// 3 days, 2 lat (descending), 2 lon; one fill value in the last cell.
fn write_small_file(path: &Path, var_name: &str, dims: &[&str]) {
    let raw: Vec<i16> = vec![
        500, 510, 520, 530, //
        600, 610, 620, 630, //
        700, 710, 720, temps::GRIDMET_FILL as i16,
    ];
    write_packed_file(
        path,
        var_name,
        dims,
        &[JAN_1_1991, JAN_1_1991 + 1.0, JAN_1_1991 + 2.0],
        &[49.0, 46.0],
        &[-124.0, -118.0],
        &raw,
    );
}

/// 4 days from 1990-12-31 on a 6x6 grid around Washington.
///
/// Each packed value encodes its own position as `day * 100 + row * 10 + col`.
fn write_regional_file(path: &Path) {
    let days: Vec<f64> = (0..4).map(|t| JAN_1_1991 - 1.0 + t as f64).collect();
    let lat = [50.0, 49.0, 48.0, 47.0, 46.0, 45.0];
    let lon = [-126.0, -124.0, -122.0, -120.0, -118.0, -116.0];
    let mut raw = Vec::new();
    for t in 0..4i16 {
        for i in 0..6i16 {
            for j in 0..6i16 {
                raw.push(t * 100 + i * 10 + j);
            }
        }
    }
    write_packed_file(path, "tmax", &["day", "lat", "lon"], &days, &lat, &lon, &raw);
}

fn washington() -> BoundingBox {
    let (min_x, min_y, max_x, max_y) = bbox::WASHINGTON;
    BoundingBox::new(min_x, min_y, max_x, max_y)
}

// ============================================================================
// Whole-variable reads
// ============================================================================

#[test]
fn test_load_packed_grid() {
    let dir = temp_test_dir();
    let path = dir.path().join("tmin.nc");
    write_small_file(&path, "tmin", &["day", "lat", "lon"]);

    let grid = load_temperature_grid(&path, "tmin").unwrap();
    assert_eq!(grid.shape(), (3, 2, 2));
    assert_eq!(grid.units.as_deref(), Some("K"));
    assert_eq!(grid.lat, vec![49.0, 46.0]);
    assert_eq!(grid.lon, vec![-124.0, -118.0]);
    assert_eq!(grid.days, vec![d(1991, 1, 1), d(1991, 1, 2), d(1991, 1, 3)]);
    assert_approx_eq!(grid.data[0], 270.0, 1e-6);
    assert_approx_eq!(grid.data[5], 281.0, 1e-6);
    assert!(grid.data[11].is_nan());
}

#[test]
fn test_missing_variable() {
    let dir = temp_test_dir();
    let path = dir.path().join("tmax.nc");
    write_small_file(&path, "tmax", &["day", "lat", "lon"]);

    let err = load_temperature_grid(&path, "tmin").unwrap_err();
    assert!(matches!(err, NetCdfError::MissingData(_)));
}

#[test]
fn test_wrong_dimension_order() {
    let dir = temp_test_dir();
    let path = dir.path().join("tmin.nc");
    write_small_file(&path, "tmin", &["day", "lon", "lat"]);

    let err = load_temperature_grid(&path, "tmin").unwrap_err();
    assert!(matches!(err, NetCdfError::InvalidFormat(_)));
}

#[test]
fn test_not_a_netcdf_file() {
    let dir = temp_test_dir();
    let path = dir.path().join("garbage.nc");
    std::fs::write(&path, b"this is not netcdf").unwrap();

    let err = load_temperature_grid(&path, "tmin").unwrap_err();
    assert!(matches!(err, NetCdfError::InvalidFormat(_)));
}

// ============================================================================
// Windowed reads
// ============================================================================

#[test]
fn test_window_reads_only_bbox_and_dates() {
    let dir = temp_test_dir();
    let path = dir.path().join("tmax.nc");
    write_regional_file(&path);

    let window = ReadWindow::new(washington(), d(1991, 1, 1), d(1991, 1, 2));
    let grid = load_temperature_window(&path, "tmax", &window).unwrap();

    assert_eq!(grid.shape(), (2, 4, 4));
    assert_eq!(grid.days, vec![d(1991, 1, 1), d(1991, 1, 2)]);
    assert_eq!(grid.lat, vec![49.0, 48.0, 47.0, 46.0]);
    assert_eq!(grid.lon, vec![-124.0, -122.0, -120.0, -118.0]);
    assert_eq!(grid.data.len(), 32);

    // First window cell is file day 1, row 1, col 1
    assert_approx_eq!(grid.data[0], unpacked(111), 1e-6);
    // Window (day 1, row 2, col 3) is file (2, 3, 4)
    assert_approx_eq!(grid.data[16 + 2 * 4 + 3], unpacked(234), 1e-6);
    assert_approx_eq!(grid.data[31], unpacked(244), 1e-6);
}

#[test]
fn test_window_without_dates_keeps_every_day() {
    let dir = temp_test_dir();
    let path = dir.path().join("tmax.nc");
    write_regional_file(&path);

    let window = ReadWindow {
        bbox: Some(washington()),
        dates: None,
    };
    let grid = load_temperature_window(&path, "tmax", &window).unwrap();
    assert_eq!(grid.shape(), (4, 4, 4));
    assert_eq!(grid.days[0], d(1990, 12, 31));
}

#[test]
fn test_window_outside_grid_is_empty_selection() {
    let dir = temp_test_dir();
    let path = dir.path().join("tmax.nc");
    write_regional_file(&path);

    let (min_x, min_y, max_x, max_y) = bbox::SOUTH_PACIFIC;
    let window = ReadWindow {
        bbox: Some(BoundingBox::new(min_x, min_y, max_x, max_y)),
        dates: None,
    };
    let err = load_temperature_window(&path, "tmax", &window).unwrap_err();
    assert!(matches!(err, NetCdfError::EmptySelection { .. }));
}

#[test]
fn test_window_dates_outside_record_is_empty_selection() {
    let dir = temp_test_dir();
    let path = dir.path().join("tmax.nc");
    write_regional_file(&path);

    let window = ReadWindow::new(washington(), d(2000, 1, 1), d(2000, 4, 30));
    match load_temperature_window(&path, "tmax", &window).unwrap_err() {
        NetCdfError::EmptySelection { axis, .. } => assert_eq!(axis, "day"),
        other => panic!("unexpected error: {other}"),
    }
}
