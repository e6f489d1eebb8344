//! Seasonal filtering, yearly aggregation and the multi-year mean.
//!
//! Days outside the month window are kept in the array as NaN and skipped by
//! the yearly sum, so the day dimension after `filter_season` still reflects
//! the absolute date range.

use std::collections::BTreeMap;

use chrono::Datelike;
use gdd_common::{GddResult, SeasonWindow};
use ndarray::{Array2, Array3, Axis, Zip};

use crate::field::{Climatology, GriddedField, SeasonalField};

/// Restrict a daily field to a season window.
///
/// Days outside `[year_start-01-01, year_end-04-30]` are dropped. Remaining
/// days whose month falls outside `[month_start, month_end]` become NaN.
pub fn filter_season(field: &GriddedField, window: &SeasonWindow) -> GddResult<GriddedField> {
    let kept: Vec<usize> = field
        .days()
        .iter()
        .enumerate()
        .filter(|(_, day)| window.in_date_range(**day))
        .map(|(i, _)| i)
        .collect();

    let days: Vec<_> = kept.iter().map(|&i| field.days()[i]).collect();
    let mut values = field.values().select(Axis(0), &kept);

    for (i, day) in days.iter().enumerate() {
        if !window.in_months(*day) {
            values.index_axis_mut(Axis(0), i).fill(f64::NAN);
        }
    }

    GriddedField::new(
        field.name(),
        field.units(),
        days,
        field.lat().clone(),
        field.lon().clone(),
        values,
    )
}

/// Sum each calendar year's days into one `(lat, lon)` slice.
///
/// Missing values contribute nothing. A cell with no valid day in a year is
/// NaN for that year. Years come out in ascending order.
pub fn aggregate_seasonal(field: &GriddedField) -> SeasonalField {
    let mut by_year: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, day) in field.days().iter().enumerate() {
        by_year.entry(day.year()).or_default().push(i);
    }

    let (_, n_lat, n_lon) = field.shape();
    let mut values = Array3::<f64>::zeros((by_year.len(), n_lat, n_lon));

    for (slot, indices) in by_year.values().enumerate() {
        let mut sums = Array2::<f64>::zeros((n_lat, n_lon));
        let mut counts = Array2::<u32>::zeros((n_lat, n_lon));

        for &d in indices {
            Zip::from(&mut sums)
                .and(&mut counts)
                .and(field.values().index_axis(Axis(0), d))
                .for_each(|sum, count, &v| {
                    if !v.is_nan() {
                        *sum += v;
                        *count += 1;
                    }
                });
        }

        Zip::from(values.index_axis_mut(Axis(0), slot))
            .and(&sums)
            .and(&counts)
            .for_each(|out, &sum, &count| {
                *out = if count == 0 { f64::NAN } else { sum };
            });
    }

    SeasonalField {
        years: by_year.keys().copied().collect(),
        lat: field.lat().clone(),
        lon: field.lon().clone(),
        values,
    }
}

/// Mean of the seasonal sums across years.
///
/// Missing years are excluded from the mean rather than counted as zero; a
/// cell missing in every year stays NaN. Values are summed in sorted order,
/// so the result does not depend on year order.
pub fn average_over_years(seasonal: &SeasonalField) -> Climatology {
    let values = seasonal.values.map_axis(Axis(0), |lane| {
        let mut valid: Vec<f64> = lane.iter().copied().filter(|v| !v.is_nan()).collect();
        if valid.is_empty() {
            return f64::NAN;
        }
        valid.sort_by(|a, b| a.total_cmp(b));
        valid.iter().sum::<f64>() / valid.len() as f64
    });

    Climatology {
        lat: seasonal.lat.clone(),
        lon: seasonal.lon.clone(),
        values,
    }
}
