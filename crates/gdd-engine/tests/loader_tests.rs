//! Loading fields from NetCDF, whole and through the pipeline's read window.

use std::path::Path;

use chrono::{Datelike, NaiveDate};
use gdd_common::{BoundingBox, GddError};
use gdd_engine::{load_field, load_field_window, run_pipeline, PipelineConfig, ReadWindow};
use test_utils::fixtures::bbox::SOUTH_PACIFIC;
use test_utils::fixtures::grid::WASHINGTON_COARSE;
use test_utils::fixtures::temps::TEN_C_K;
use test_utils::{daily_dates, daily_grid_from_fn, latitude_gradient_grid, temp_test_dir};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Write an unpacked Kelvin `(day, lat, lon)` file on the coarse Washington grid.
fn write_kelvin_file(path: &Path, var_name: &str, days: &[NaiveDate], data: &[f64]) {
    let spec = WASHINGTON_COARSE;
    let epoch = d(1900, 1, 1);
    let offsets: Vec<f64> = days
        .iter()
        .map(|day| day.signed_duration_since(epoch).num_days() as f64)
        .collect();

    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("day", days.len()).unwrap();
    file.add_dimension("lat", spec.n_lat).unwrap();
    file.add_dimension("lon", spec.n_lon).unwrap();

    let mut day = file.add_variable::<f64>("day", &["day"]).unwrap();
    day.put_attribute("units", "days since 1900-01-01 00:00:00")
        .unwrap();
    day.put_values(&offsets, ..).unwrap();

    let mut lat = file.add_variable::<f64>("lat", &["lat"]).unwrap();
    lat.put_values(&spec.lat(), ..).unwrap();

    let mut lon = file.add_variable::<f64>("lon", &["lon"]).unwrap();
    lon.put_values(&spec.lon(), ..).unwrap();

    let mut var = file
        .add_variable::<f64>(var_name, &["day", "lat", "lon"])
        .unwrap();
    var.put_attribute("units", "K").unwrap();
    var.put_values(data, ..).unwrap();
}

/// tmin is a flat 10 °C; tmax warms with the day of the month and toward the south.
fn write_pair(dir: &Path, days: &[NaiveDate]) -> (std::path::PathBuf, std::path::PathBuf) {
    let spec = WASHINGTON_COARSE;
    let tmin_path = dir.join("tmmn.nc");
    let tmax_path = dir.join("tmmx.nc");

    let tmin = daily_grid_from_fn(days, spec.n_lat, spec.n_lon, |_| TEN_C_K);
    let gradient = latitude_gradient_grid(days.len(), spec.n_lat, spec.n_lon, 295.0, 1.0);
    let daily = daily_grid_from_fn(days, spec.n_lat, spec.n_lon, |day| day.day() as f64 / 10.0);
    let tmax: Vec<f64> = gradient.iter().zip(&daily).map(|(g, t)| g + t).collect();

    write_kelvin_file(&tmin_path, "tmin", days, &tmin);
    write_kelvin_file(&tmax_path, "tmax", days, &tmax);
    (tmin_path, tmax_path)
}

#[test]
fn test_read_window_trims_space_and_time() {
    let dir = temp_test_dir();
    let days = daily_dates(d(1990, 12, 1), d(1991, 6, 30));
    let (_, tmax_path) = write_pair(dir.path(), &days);

    let config = PipelineConfig::default();
    let field = load_field_window(&tmax_path, "tmax", &config.read_window()).unwrap();

    // 1991-01-01 through 1991-06-30; the April cutoff is applied later
    assert_eq!(field.shape(), (181, 4, 8));
    assert_eq!(field.days()[0], d(1991, 1, 1));
    assert_eq!(field.lat().values(), &[49.0, 48.0, 47.0, 46.0]);
}

#[test]
fn test_windowed_and_full_loads_give_same_climatology() {
    let dir = temp_test_dir();
    let days = daily_dates(d(1990, 12, 1), d(1992, 6, 30));
    let (tmin_path, tmax_path) = write_pair(dir.path(), &days);
    let config = PipelineConfig::default();

    let full = run_pipeline(
        &load_field(&tmin_path, "tmin").unwrap(),
        &load_field(&tmax_path, "tmax").unwrap(),
        &config,
    )
    .unwrap();

    let window = config.read_window();
    let windowed = run_pipeline(
        &load_field_window(&tmin_path, "tmin", &window).unwrap(),
        &load_field_window(&tmax_path, "tmax", &window).unwrap(),
        &config,
    )
    .unwrap();

    assert_eq!(windowed.climatology, full.climatology);
    assert!(windowed.stages[0].dims[0].1 < full.stages[0].dims[0].1);
}

#[test]
fn test_window_outside_grid_is_empty_selection() {
    let dir = temp_test_dir();
    let days = daily_dates(d(1991, 1, 1), d(1991, 1, 5));
    let (tmin_path, _) = write_pair(dir.path(), &days);

    let (min_x, min_y, max_x, max_y) = SOUTH_PACIFIC;
    let window = ReadWindow {
        bbox: Some(BoundingBox::new(min_x, min_y, max_x, max_y)),
        dates: None,
    };
    let err = load_field_window(&tmin_path, "tmin", &window).unwrap_err();
    assert!(matches!(err, GddError::EmptySelection { .. }));
    assert_eq!(err.code(), "EmptySelectionError");
}
