//! Growing Degree Day computation.

use gdd_common::{GddError, GddResult};
use ndarray::Zip;

use crate::field::{GriddedField, Units};

/// Base temperature in °C below which no heat units accumulate.
pub const DEFAULT_BASE_TEMP_C: f64 = 0.0;

/// Daily growing degree days: `max(0, (tmin + tmax) / 2 - base_temp)`.
///
/// Both inputs must share identical day/lat/lon labels. Missing cells (NaN)
/// in either input stay missing rather than being floored to zero.
pub fn compute_gdd(
    tmin: &GriddedField,
    tmax: &GriddedField,
    base_temp: f64,
) -> GddResult<GriddedField> {
    if !tmin.same_grid(tmax) {
        return Err(GddError::ShapeMismatch {
            left: describe(tmin),
            right: describe(tmax),
        });
    }

    let values = Zip::from(tmin.values())
        .and(tmax.values())
        .map_collect(|&lo, &hi| daily_gdd(lo, hi, base_temp));

    Ok(tmin.with_values("gdd", Units::DegreeDays, values))
}

/// Single-cell GDD with the zero floor.
#[inline]
pub fn daily_gdd(tmin: f64, tmax: f64, base_temp: f64) -> f64 {
    let gdd = (tmin + tmax) / 2.0 - base_temp;
    if gdd.is_nan() {
        f64::NAN
    } else {
        gdd.max(0.0)
    }
}

fn describe(field: &GriddedField) -> String {
    let (days, lat, lon) = field.shape();
    let span = match (field.days().first(), field.days().last()) {
        (Some(first), Some(last)) => format!("{}..{}", first, last),
        _ => "no days".to_string(),
    };
    format!("{} (day={}, lat={}, lon={}; {})", field.name(), days, lat, lon, span)
}
