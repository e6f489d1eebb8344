//! Tick placement and degree labels for gridlines.

/// Multipliers tried for each power of ten, smallest first.
const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// A set of evenly spaced tick positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    pub step: f64,
    pub values: Vec<f64>,
}

/// Pick at most `max_bins + 1` ticks at a "nice" spacing within `[lo, hi]`.
///
/// The step is the smallest of 1, 2, 2.5, 5 or 10 times a power of ten that
/// splits the range into no more than `max_bins` intervals.
pub fn max_n_ticks(lo: f64, hi: f64, max_bins: usize) -> Ticks {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) || max_bins == 0 {
        return Ticks {
            step: 0.0,
            values: Vec::new(),
        };
    }

    let raw = span / max_bins as f64;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let step = NICE_STEPS
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude);

    let eps = step * 1e-9;
    let first = ((lo - eps) / step).ceil() as i64;
    let last = ((hi + eps) / step).floor() as i64;
    let values = (first..=last).map(|k| round_to_step(k as f64 * step, step)).collect();

    Ticks { step, values }
}

fn round_to_step(value: f64, step: f64) -> f64 {
    let decimals = decimals_for(step) as i32 + 1;
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Decimal places needed to print multiples of `step` exactly (up to 3).
pub fn decimals_for(step: f64) -> usize {
    (0..=3)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .unwrap_or(3)
}

fn format_degrees(value: f64, decimals: usize, positive: char, negative: char) -> String {
    let magnitude = format!("{:.*}", decimals, value.abs());
    let is_zero = magnitude.chars().all(|c| c == '0' || c == '.');
    if is_zero {
        format!("{}°", magnitude)
    } else if value > 0.0 {
        format!("{}°{}", magnitude, positive)
    } else {
        format!("{}°{}", magnitude, negative)
    }
}

/// `-124.0` -> `124°W`, `10.5` -> `10.5°E`, `0` -> `0°`.
pub fn format_longitude(lon: f64, decimals: usize) -> String {
    format_degrees(lon, decimals, 'E', 'W')
}

/// `47.0` -> `47°N`, `-12.25` -> `12.25°S`.
pub fn format_latitude(lat: f64, decimals: usize) -> String {
    format_degrees(lat, decimals, 'N', 'S')
}
