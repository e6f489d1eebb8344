//! Tests for BoundingBox operations and how boxes map onto coordinate axes.

use gdd_common::bbox::BoundingBox;
use gdd_common::grid::{AxisOrder, CoordAxis};

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
}

#[test]
fn test_bbox_dimensions() {
    let bbox = BoundingBox::WASHINGTON;
    assert!((bbox.width() - 7.79095).abs() < 1e-9);
    assert!((bbox.height() - 3.8616).abs() < 1e-9);
}

#[test]
fn test_bbox_invalid_when_inverted() {
    let bbox = BoundingBox::new(10.0, 0.0, -10.0, 5.0);
    assert!(!bbox.is_valid());
}

// ============================================================================
// Intersection tests
// ============================================================================

#[test]
fn test_intersects() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(10.5, 0.0, 20.0, 10.0);
    let c = BoundingBox::new(9.0, 9.0, 12.0, 12.0);
    assert!(!a.intersects(&b));
    assert!(a.intersects(&c));
    assert!(c.intersects(&b));
}

// ============================================================================
// Bounding box against axes
// ============================================================================

#[test]
fn test_bbox_slices_on_gridmet_style_axes() {
    let bbox = BoundingBox::WASHINGTON;
    // 1/24 degree grid like gridMET, latitude north to south
    let lat: Vec<f64> = (0..200).map(|i| 50.0 - i as f64 / 24.0).collect();
    let lon: Vec<f64> = (0..300).map(|i| -126.0 + i as f64 / 24.0).collect();
    let lat = CoordAxis::new("lat", lat).unwrap();
    let lon = CoordAxis::new("lon", lon).unwrap();
    assert_eq!(lat.order(), AxisOrder::Descending);

    let lat_range = lat.slice_range(lat.slice_for_range(bbox.min_y, bbox.max_y));
    let lon_range = lon.slice_range(lon.slice_for_range(bbox.min_x, bbox.max_x));
    assert!(!lat_range.is_empty());
    assert!(!lon_range.is_empty());

    for &v in &lat.values()[lat_range] {
        assert!(v >= bbox.min_y && v <= bbox.max_y);
    }
    for &v in &lon.values()[lon_range] {
        assert!(v >= bbox.min_x && v <= bbox.max_x);
    }
}
