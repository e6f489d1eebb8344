//! Coordinate axes for labeled lat/lon grids.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{GddError, GddResult};

/// Storage order of a coordinate axis.
///
/// Gridded climate products disagree on latitude order: gridMET stores it
/// north to south (descending) while most models store it south to north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrder {
    Ascending,
    Descending,
}

/// A label slice `start -> stop`, applied in the axis's stored order.
///
/// Mirrors label-based `sel(slice(start, stop))`: on a descending axis the
/// slice must also run high to low, otherwise nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordSlice {
    pub start: f64,
    pub stop: f64,
}

impl CoordSlice {
    pub fn new(start: f64, stop: f64) -> Self {
        Self { start, stop }
    }
}

/// A named, strictly monotonic coordinate axis (`lat` or `lon`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordAxis {
    name: String,
    values: Vec<f64>,
}

impl CoordAxis {
    /// Build an axis, rejecting non-finite or non-monotonic coordinates.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> GddResult<Self> {
        let name = name.into();
        if values.iter().any(|v| !v.is_finite()) {
            return Err(GddError::DataAccess(format!(
                "coordinate '{}' contains non-finite values",
                name
            )));
        }
        let ascending = values.windows(2).all(|w| w[0] < w[1]);
        let descending = values.windows(2).all(|w| w[0] > w[1]);
        if !ascending && !descending {
            return Err(GddError::DataAccess(format!(
                "coordinate '{}' is not strictly monotonic",
                name
            )));
        }
        Ok(Self { name, values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Detected storage order. Axes with fewer than two points count as
    /// ascending.
    pub fn order(&self) -> AxisOrder {
        match self.values.as_slice() {
            [first, second, ..] if first > second => AxisOrder::Descending,
            _ => AxisOrder::Ascending,
        }
    }

    /// Slice bounds for the numeric range `[lo, hi]`, ordered to match
    /// this axis.
    pub fn slice_for_range(&self, lo: f64, hi: f64) -> CoordSlice {
        match self.order() {
            AxisOrder::Ascending => CoordSlice::new(lo, hi),
            AxisOrder::Descending => CoordSlice::new(hi, lo),
        }
    }

    /// Index range selected by a label slice, in stored order.
    ///
    /// A slice given against the stored order yields an empty range.
    pub fn slice_range(&self, slice: CoordSlice) -> Range<usize> {
        let (start, stop) = match self.order() {
            AxisOrder::Ascending => (
                self.values.partition_point(|&v| v < slice.start),
                self.values.partition_point(|&v| v <= slice.stop),
            ),
            AxisOrder::Descending => (
                self.values.partition_point(|&v| v > slice.start),
                self.values.partition_point(|&v| v >= slice.stop),
            ),
        };
        if stop < start {
            start..start
        } else {
            start..stop
        }
    }

    /// A new axis holding only the given index range.
    pub fn select(&self, range: Range<usize>) -> CoordAxis {
        CoordAxis {
            name: self.name.clone(),
            values: self.values[range].to_vec(),
        }
    }

    /// Fractional index of `value` between neighbouring coordinates, or
    /// `None` if it falls outside the axis.
    pub fn fractional_index(&self, value: f64) -> Option<f64> {
        let n = self.values.len();
        if n == 0 || !value.is_finite() {
            return None;
        }
        if n == 1 {
            return (value == self.values[0]).then_some(0.0);
        }
        let i = match self.order() {
            AxisOrder::Ascending => self.values.partition_point(|&v| v <= value),
            AxisOrder::Descending => self.values.partition_point(|&v| v >= value),
        };
        // i is the count of coordinates at or "before" value in stored order.
        if i == 0 {
            return None;
        }
        if i == n {
            return (value == self.values[n - 1]).then_some((n - 1) as f64);
        }
        let (a, b) = (self.values[i - 1], self.values[i]);
        Some((i - 1) as f64 + (value - a) / (b - a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lat_desc() -> CoordAxis {
        CoordAxis::new("lat", vec![49.5, 48.5, 47.5, 46.5, 45.5]).unwrap()
    }

    #[test]
    fn test_order_detection() {
        assert_eq!(lat_desc().order(), AxisOrder::Descending);
        let lon = CoordAxis::new("lon", vec![-125.0, -124.0]).unwrap();
        assert_eq!(lon.order(), AxisOrder::Ascending);
    }

    #[test]
    fn test_rejects_non_monotonic() {
        assert!(CoordAxis::new("lat", vec![1.0, 3.0, 2.0]).is_err());
        assert!(CoordAxis::new("lat", vec![1.0, 1.0]).is_err());
        assert!(CoordAxis::new("lat", vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_descending_slice_in_stored_order() {
        let lat = lat_desc();
        assert_eq!(lat.slice_range(CoordSlice::new(49.0, 46.0)), 1..4);
    }

    #[test]
    fn test_ascending_slice_on_descending_axis_is_empty() {
        let lat = lat_desc();
        assert!(lat.slice_range(CoordSlice::new(46.0, 49.0)).is_empty());
    }

    #[test]
    fn test_slice_for_range_follows_order() {
        let lat = lat_desc();
        let slice = lat.slice_for_range(46.0, 49.0);
        assert_eq!(slice, CoordSlice::new(49.0, 46.0));
        assert_eq!(lat.slice_range(slice), 1..4);
    }

    #[test]
    fn test_fractional_index() {
        let lat = lat_desc();
        assert_eq!(lat.fractional_index(49.5), Some(0.0));
        assert_eq!(lat.fractional_index(45.5), Some(4.0));
        let f = lat.fractional_index(48.0).unwrap();
        assert!((f - 1.5).abs() < 1e-12);
        assert_eq!(lat.fractional_index(50.0), None);
        assert_eq!(lat.fractional_index(45.0), None);
    }
}
