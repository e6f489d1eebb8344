//! Horizontal colorbar for filled contour bands.

use crate::colormap::Rgb;
use crate::error::{RenderError, RenderResult};
use crate::figure::{Figure, LineStyle};
use crate::projection::PixelRect;
use crate::text::{HAlign, TextItem, TextStyle, VAlign};
use crate::ticks::{decimals_for, max_n_ticks};

/// Tick length in points.
const TICK_PT: f64 = 3.5;
/// Gap between tick and label in points.
const TICK_PAD_PT: f64 = 3.5;
/// Maximum colorbar tick intervals.
const MAX_TICK_BINS: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct Colorbar<'a> {
    /// Ascending band boundaries
    pub levels: &'a [f64],
    /// One color per band, `levels.len() - 1` entries
    pub colors: &'a [Rgb],
    pub label: &'a str,
    pub tick_style: TextStyle,
    pub label_style: TextStyle,
}

impl<'a> Colorbar<'a> {
    /// Height of tick marks, tick labels and the label below the bar.
    pub fn decoration_height(&self, fig: &Figure<'_>) -> f64 {
        let (_, tick_h) = fig.measure_text("0", &self.tick_style);
        let (_, label_h) = fig.measure_text(self.label, &self.label_style);
        fig.pt(TICK_PT + TICK_PAD_PT) + tick_h + fig.pt(TICK_PAD_PT) + label_h
    }

    /// Draw the bar into `rect` with ticks and label below it.
    pub fn draw(&self, fig: &mut Figure<'_>, rect: PixelRect) -> RenderResult<()> {
        let (lo, hi) = match (self.levels.first(), self.levels.last()) {
            (Some(&lo), Some(&hi)) if hi > lo => (lo, hi),
            _ => {
                return Err(RenderError::InvalidFigure(
                    "colorbar needs at least two ascending levels".to_string(),
                ))
            }
        };
        if self.colors.len() + 1 != self.levels.len() {
            return Err(RenderError::InvalidFigure(format!(
                "{} levels need {} colors, got {}",
                self.levels.len(),
                self.levels.len() - 1,
                self.colors.len()
            )));
        }

        let x_at = |v: f64| rect.x + (v - lo) / (hi - lo) * rect.width;

        for (w, color) in self.levels.windows(2).zip(self.colors) {
            let (x0, x1) = (x_at(w[0]), x_at(w[1]));
            fig.fill_rect(PixelRect::new(x0, rect.y, x1 - x0, rect.height), *color)?;
        }
        fig.stroke_rect(rect, &LineStyle::solid(Rgb::BLACK, 0.8))?;

        let ticks = max_n_ticks(lo, hi, MAX_TICK_BINS);
        let decimals = decimals_for(ticks.step);
        let tick_style = LineStyle::solid(Rgb::BLACK, 0.8);
        let tick_len = fig.pt(TICK_PT);
        let label_top = rect.bottom() + tick_len + fig.pt(TICK_PAD_PT);
        for &t in &ticks.values {
            let x = x_at(t);
            fig.stroke_polyline(&[(x, rect.bottom()), (x, rect.bottom() + tick_len)], &tick_style);
            fig.text(TextItem {
                text: format!("{:.*}", decimals, t),
                x,
                y: label_top,
                h_align: HAlign::Center,
                v_align: VAlign::Top,
                style: self.tick_style,
            });
        }

        let (_, tick_h) = fig.measure_text("0", &self.tick_style);
        fig.text(TextItem {
            text: self.label.to_string(),
            x: rect.center_x(),
            y: label_top + tick_h + fig.pt(TICK_PAD_PT),
            h_align: HAlign::Center,
            v_align: VAlign::Top,
            style: self.label_style,
        });
        Ok(())
    }
}
