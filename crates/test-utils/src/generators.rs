//! Synthetic daily temperature data.
//!
//! All grids are flat `Vec<f64>` in `(day, lat, lon)` row-major order, the
//! layout the NetCDF reader produces.

use chrono::{Datelike, Duration, NaiveDate};

/// Every calendar day from `start` to `end`, inclusive.
///
/// ```
/// use chrono::NaiveDate;
/// use test_utils::daily_dates;
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let days = daily_dates(d(1992, 2, 28), d(1992, 3, 1));
/// assert_eq!(days.len(), 3); // 1992 is a leap year
/// ```
pub fn daily_dates(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

/// The 15th of every month for the given years.
pub fn mid_month_dates(years: &[i32]) -> Vec<NaiveDate> {
    years
        .iter()
        .flat_map(|&y| (1..=12).filter_map(move |m| NaiveDate::from_ymd_opt(y, m, 15)))
        .collect()
}

/// Number of days from January 1 through April 30 of `year`.
pub fn jan_apr_days(year: i32) -> usize {
    let leap = NaiveDate::from_ymd_opt(year, 2, 29).is_some();
    if leap {
        121
    } else {
        120
    }
}

/// A grid with the same value in every cell of every day.
pub fn constant_daily_grid(n_days: usize, n_lat: usize, n_lon: usize, value: f64) -> Vec<f64> {
    vec![value; n_days * n_lat * n_lon]
}

/// A grid whose value depends only on the date.
///
/// Useful for checking which days survive a filter: the value tells you
/// the day it came from.
pub fn daily_grid_from_fn<F>(days: &[NaiveDate], n_lat: usize, n_lon: usize, f: F) -> Vec<f64>
where
    F: Fn(NaiveDate) -> f64,
{
    days.iter()
        .flat_map(|&day| std::iter::repeat(f(day)).take(n_lat * n_lon))
        .collect()
}

/// Encodes a date as `year * 100 + month`, e.g. 1991-03-15 -> 199103.
pub fn year_month_code(day: NaiveDate) -> f64 {
    (day.year() * 100 + day.month() as i32) as f64
}

/// Kelvin temperatures with a north-south gradient.
///
/// Row 0 (north) is `south_k - (n_lat - 1) * step_k`, the last row is
/// `south_k`. Every day repeats the same slice.
pub fn latitude_gradient_grid(
    n_days: usize,
    n_lat: usize,
    n_lon: usize,
    south_k: f64,
    step_k: f64,
) -> Vec<f64> {
    let mut slice = Vec::with_capacity(n_lat * n_lon);
    for row in 0..n_lat {
        let value = south_k - (n_lat - 1 - row) as f64 * step_k;
        slice.extend(std::iter::repeat(value).take(n_lon));
    }
    slice.repeat(n_days)
}

/// Marks `(day, row, col)` positions as NaN.
pub fn with_nans(
    mut data: Vec<f64>,
    n_lat: usize,
    n_lon: usize,
    positions: &[(usize, usize, usize)],
) -> Vec<f64> {
    for &(day, row, col) in positions {
        let idx = (day * n_lat + row) * n_lon + col;
        if row < n_lat && col < n_lon && idx < data.len() {
            data[idx] = f64::NAN;
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_daily_dates_inclusive() {
        let days = daily_dates(d(1991, 1, 1), d(1991, 1, 31));
        assert_eq!(days.len(), 31);
        assert_eq!(days[0], d(1991, 1, 1));
        assert_eq!(days[30], d(1991, 1, 31));
        assert!(daily_dates(d(1991, 2, 1), d(1991, 1, 1)).is_empty());
    }

    #[test]
    fn test_mid_month_dates() {
        let days = mid_month_dates(&[1991, 1992]);
        assert_eq!(days.len(), 24);
        assert_eq!(days[13], d(1992, 2, 15));
    }

    #[test]
    fn test_jan_apr_days() {
        assert_eq!(jan_apr_days(1991), 120);
        assert_eq!(jan_apr_days(1992), 121);
        assert_eq!(jan_apr_days(2000), 121);
        assert_eq!(jan_apr_days(1900), 120);
    }

    #[test]
    fn test_daily_grid_from_fn_layout() {
        let days = vec![d(1991, 1, 15), d(1991, 5, 15)];
        let grid = daily_grid_from_fn(&days, 2, 3, year_month_code);
        assert_eq!(grid.len(), 12);
        assert!(grid[..6].iter().all(|&v| v == 199101.0));
        assert!(grid[6..].iter().all(|&v| v == 199105.0));
    }

    #[test]
    fn test_latitude_gradient_grid() {
        let grid = latitude_gradient_grid(2, 3, 2, 280.0, 5.0);
        assert_eq!(grid.len(), 12);
        assert_eq!(&grid[..6], &[270.0, 270.0, 275.0, 275.0, 280.0, 280.0]);
        assert_eq!(&grid[6..], &grid[..6]);
    }

    #[test]
    fn test_with_nans() {
        let grid = with_nans(constant_daily_grid(2, 2, 2, 1.0), 2, 2, &[(1, 0, 1), (5, 0, 0)]);
        assert!(grid[5].is_nan());
        assert_eq!(grid.iter().filter(|v| v.is_nan()).count(), 1);
    }
}
