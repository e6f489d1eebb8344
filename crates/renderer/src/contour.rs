//! Filled contour banding.
//!
//! Levels are fixed-step boundaries from zero to just past the data
//! maximum. Cells at or below zero are masked out of the drawing, and every
//! output pixel is bilinearly interpolated from its four surrounding grid
//! points before being assigned to a band.

use ndarray::ArrayView2;
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// Default spacing between contour levels.
pub const DEFAULT_LEVEL_STEP: f64 = 25.0;

/// Contour levels from 0 to `ceil(max / step) * step` inclusive.
///
/// A maximum of 172 with step 25 gives `0, 25, ..., 175`. A maximum that is
/// not a positive finite number fails with `RenderError::NoData`.
pub fn contour_levels(max: f64, step: f64) -> RenderResult<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(RenderError::InvalidFigure(format!(
            "contour step must be positive, got {}",
            step
        )));
    }
    if !(max.is_finite() && max > 0.0) {
        return Err(RenderError::NoData(format!(
            "maximum value {} leaves no positive range to contour",
            max
        )));
    }

    let top = (max / step).ceil() as usize;
    Ok((0..=top).map(|i| i as f64 * step).collect())
}

/// Cells that are NaN or not above zero become `None`.
///
/// Only used for drawing; the source values are untouched.
pub fn mask_non_positive<'a, I>(values: I) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = &'a f64>,
{
    values
        .into_iter()
        .map(|&v| if v > 0.0 { Some(v) } else { None })
        .collect()
}

/// Largest value that survives masking.
pub fn masked_max(cells: &[Option<f64>]) -> Option<f64> {
    cells
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
}

/// Where a value falls relative to the contour levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Below the first level
    Under,
    /// Index of the band `(levels[i], levels[i + 1]]`; the first band also
    /// includes `levels[0]`
    Level(usize),
    /// Above the last level
    Over,
}

/// Assign `value` to a band.
///
/// `levels` must be ascending with at least two entries.
pub fn band_for(value: f64, levels: &[f64]) -> Band {
    match (levels.first(), levels.last()) {
        (Some(&lo), Some(&hi)) if levels.len() >= 2 => {
            if value < lo {
                Band::Under
            } else if value > hi {
                Band::Over
            } else {
                // First level strictly greater-or-equal to value closes the band.
                let upper = levels.partition_point(|&l| l < value).max(1);
                Band::Level(upper - 1)
            }
        }
        _ => Band::Over,
    }
}

/// Masked grid ready for contour filling.
#[derive(Debug, Clone)]
pub struct MaskedGrid {
    n_rows: usize,
    n_cols: usize,
    cells: Vec<Option<f64>>,
}

impl MaskedGrid {
    /// Mask a `(lat, lon)` array with [`mask_non_positive`].
    pub fn from_values(values: ArrayView2<'_, f64>) -> Self {
        let (n_rows, n_cols) = values.dim();
        Self {
            n_rows,
            n_cols,
            cells: mask_non_positive(values.iter()),
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn cells(&self) -> &[Option<f64>] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.n_rows && col < self.n_cols {
            self.cells[row * self.n_cols + col]
        } else {
            None
        }
    }

    pub fn max(&self) -> Option<f64> {
        masked_max(&self.cells)
    }

    /// Bilinear value at fractional `(row, col)`.
    ///
    /// Returns `None` when any of the four surrounding cells is masked, so
    /// fills stop at the edge of valid data.
    pub fn sample(&self, row: f64, col: f64) -> Option<f64> {
        if !(row >= 0.0 && col >= 0.0) {
            return None;
        }
        let r0 = row.floor() as usize;
        let c0 = col.floor() as usize;
        if r0 >= self.n_rows || c0 >= self.n_cols {
            return None;
        }
        let r1 = (r0 + 1).min(self.n_rows - 1);
        let c1 = (c0 + 1).min(self.n_cols - 1);
        let fr = row - r0 as f64;
        let fc = col - c0 as f64;

        let v00 = self.get(r0, c0)?;
        let v01 = self.get(r0, c1)?;
        let v10 = self.get(r1, c0)?;
        let v11 = self.get(r1, c1)?;

        let top = v00 + (v01 - v00) * fc;
        let bottom = v10 + (v11 - v10) * fc;
        Some(top + (bottom - top) * fr)
    }
}

/// Per-pixel band assignment for a filled contour plot.
#[derive(Debug, Clone)]
pub struct BandRaster {
    pub width: usize,
    pub height: usize,
    /// `None` where nothing is drawn
    pub bands: Vec<Option<Band>>,
}

impl BandRaster {
    pub fn get(&self, x: usize, y: usize) -> Option<Band> {
        self.bands.get(y * self.width + x).copied().flatten()
    }
}

/// Fill a `width x height` raster.
///
/// `locate` maps a pixel centre to a fractional `(row, col)` grid position,
/// or `None` outside the grid.
pub fn fill_bands<F>(
    grid: &MaskedGrid,
    levels: &[f64],
    width: usize,
    height: usize,
    locate: F,
) -> BandRaster
where
    F: Fn(f64, f64) -> Option<(f64, f64)>,
{
    let mut bands = Vec::with_capacity(width * height);
    let mut filled = 0usize;

    for y in 0..height {
        for x in 0..width {
            let band = locate(x as f64 + 0.5, y as f64 + 0.5)
                .and_then(|(row, col)| grid.sample(row, col))
                .map(|v| band_for(v, levels))
                .filter(|b| *b != Band::Over);
            if band.is_some() {
                filled += 1;
            }
            bands.push(band);
        }
    }

    debug!(width, height, filled, levels = levels.len(), "Filled contour bands");

    BandRaster {
        width,
        height,
        bands,
    }
}
