//! Spatial subsetting and unit conversion.

use gdd_common::{BoundingBox, CoordSlice, GddError, GddResult};
use ndarray::s;
use tracing::debug;

use crate::field::{GriddedField, Units};

/// Offset between Kelvin and Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Label-based selection of a lon/lat window.
///
/// Each slice is applied in the axis's stored order, so on a
/// north-to-south latitude axis `lat` must run high to low. A slice that
/// selects nothing fails with `GddError::EmptySelection`.
pub fn select(field: &GriddedField, lon: CoordSlice, lat: CoordSlice) -> GddResult<GriddedField> {
    let lat_range = field.lat().slice_range(lat);
    let lon_range = field.lon().slice_range(lon);

    if lat_range.is_empty() {
        return Err(GddError::empty_selection(
            "lat",
            format!(
                "slice {} -> {} matched no coordinates on a {:?} axis",
                lat.start,
                lat.stop,
                field.lat().order()
            ),
        ));
    }
    if lon_range.is_empty() {
        return Err(GddError::empty_selection(
            "lon",
            format!(
                "slice {} -> {} matched no coordinates on a {:?} axis",
                lon.start,
                lon.stop,
                field.lon().order()
            ),
        ));
    }

    debug!(
        field = field.name(),
        lat_range = ?lat_range,
        lon_range = ?lon_range,
        "Selecting window"
    );

    let values = field
        .values()
        .slice(s![.., lat_range.clone(), lon_range.clone()])
        .to_owned();
    GriddedField::new(
        field.name(),
        field.units(),
        field.days().to_vec(),
        field.lat().select(lat_range),
        field.lon().select(lon_range),
        values,
    )
}

/// Restrict a field to a bounding box.
///
/// Coordinate direction is detected per axis and the slice bounds are
/// ordered to match, so descending latitude grids select correctly.
pub fn subset(field: &GriddedField, bbox: &BoundingBox) -> GddResult<GriddedField> {
    let lon = field.lon().slice_for_range(bbox.min_x, bbox.max_x);
    let lat = field.lat().slice_for_range(bbox.min_y, bbox.max_y);
    select(field, lon, lat)
}

/// Convert Kelvin to Celsius by subtracting 273.15 from every cell.
///
/// No unit validation is done: applying this twice subtracts twice.
pub fn to_celsius(field: &GriddedField) -> GriddedField {
    let values = field.values().mapv(|k| k - KELVIN_OFFSET);
    field.with_values(field.name(), Units::Celsius, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gdd_common::CoordAxis;
    use ndarray::Array3;

    fn field() -> GriddedField {
        let days = vec![NaiveDate::from_ymd_opt(1991, 1, 1).unwrap()];
        let lat = CoordAxis::new("lat", vec![50.0, 49.0, 48.0, 47.0, 46.0, 45.0]).unwrap();
        let lon = CoordAxis::new("lon", vec![-126.0, -124.0, -122.0, -120.0, -118.0, -116.0])
            .unwrap();
        let values = Array3::from_shape_fn((1, 6, 6), |(_, i, j)| (i * 10 + j) as f64);
        GriddedField::new("tmax", Units::Kelvin, days, lat, lon, values).unwrap()
    }

    #[test]
    fn test_subset_washington_on_descending_lat() {
        let out = subset(&field(), &BoundingBox::WASHINGTON).unwrap();
        assert_eq!(out.lat().values(), &[49.0, 48.0, 47.0, 46.0]);
        assert_eq!(out.lon().values(), &[-124.0, -122.0, -120.0, -118.0]);
        assert_eq!(out.shape(), (1, 4, 4));
        // Top-left of the window is source cell (1, 1)
        assert_eq!(out.values()[[0, 0, 0]], 11.0);
    }

    #[test]
    fn test_select_ascending_lat_slice_is_empty() {
        let bbox = BoundingBox::WASHINGTON;
        let err = select(
            &field(),
            CoordSlice::new(bbox.min_x, bbox.max_x),
            CoordSlice::new(bbox.min_y, bbox.max_y),
        )
        .unwrap_err();
        match err {
            GddError::EmptySelection { axis, .. } => assert_eq!(axis, "lat"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_subset_outside_grid_is_empty() {
        let bbox = BoundingBox::new(10.0, 10.0, 20.0, 20.0);
        assert!(matches!(
            subset(&field(), &bbox),
            Err(GddError::EmptySelection { .. })
        ));
    }

    #[test]
    fn test_to_celsius_is_translation() {
        let f = field();
        let c = to_celsius(&f);
        assert_eq!(c.units(), Units::Celsius);
        for (k, c) in f.values().iter().zip(c.values().iter()) {
            assert_eq!(*c, *k - 273.15);
        }
    }
}
