//! An explicit figure: a raster canvas plus queued text, encoded once.
//!
//! Vector shapes go straight onto a `tiny-skia` pixmap. Text is queued and
//! drawn last with `rusttype`, after the pixmap is converted to an `image`
//! buffer, so labels always sit above lines and fills.

use std::path::Path;

use image::RgbaImage;
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Mask, Paint, PathBuilder, Pixmap, PremultipliedColorU8,
    Rect, Stroke, StrokeDash, Transform,
};
use tracing::debug;

use crate::colormap::Rgb;
use crate::error::{RenderError, RenderResult};
use crate::png::create_png_auto;
use crate::projection::PixelRect;
use crate::text::{draw_text_item, measure, FontSet, TextItem, TextStyle};

/// Physical size and resolution of a figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureConfig {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub background: Rgb,
}

impl Default for FigureConfig {
    /// 10 x 6 inches at 300 DPI on white.
    fn default() -> Self {
        Self {
            width_in: 10.0,
            height_in: 6.0,
            dpi: 300,
            background: Rgb::WHITE,
        }
    }
}

impl FigureConfig {
    /// Size in whole pixels.
    pub fn pixel_size(&self) -> RenderResult<(u32, u32)> {
        let w = (self.width_in * self.dpi as f64).round();
        let h = (self.height_in * self.dpi as f64).round();
        if !(w >= 1.0 && h >= 1.0 && w <= u32::MAX as f64 && h <= u32::MAX as f64) {
            return Err(RenderError::InvalidFigure(format!(
                "{} x {} in at {} dpi does not give a drawable size",
                self.width_in, self.height_in, self.dpi
            )));
        }
        Ok((w as u32, h as u32))
    }
}

/// Stroke appearance, with widths and dashes in points.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Rgb,
    pub alpha: f64,
    pub width_pt: f64,
    /// `(on, off)` dash lengths
    pub dash: Option<(f64, f64)>,
}

impl LineStyle {
    pub fn solid(color: Rgb, width_pt: f64) -> Self {
        Self {
            color,
            alpha: 1.0,
            width_pt,
            dash: None,
        }
    }

    pub fn dashed(mut self, on_pt: f64, off_pt: f64) -> Self {
        self.dash = Some((on_pt, off_pt));
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

pub struct Figure<'f> {
    config: FigureConfig,
    pixmap: Pixmap,
    clip: Option<Mask>,
    texts: Vec<TextItem>,
    fonts: &'f FontSet,
}

/// Encoded output of [`Figure::render`].
#[derive(Debug, Clone)]
pub struct RenderedFigure {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    pub png: Vec<u8>,
}

impl RenderedFigure {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        std::fs::write(path.as_ref(), &self.png)?;
        debug!(path = %path.as_ref().display(), bytes = self.png.len(), "Saved figure");
        Ok(())
    }
}

impl<'f> Figure<'f> {
    /// Create a figure, let `draw` fill it, then draw queued text and
    /// encode it as PNG.
    ///
    /// Any error from `draw` is returned and nothing is encoded.
    pub fn render<F>(config: FigureConfig, fonts: &'f FontSet, draw: F) -> RenderResult<RenderedFigure>
    where
        F: FnOnce(&mut Figure<'f>) -> RenderResult<()>,
    {
        let (width, height) = config.pixel_size()?;
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::InvalidFigure(format!("cannot allocate {}x{} pixmap", width, height))
        })?;
        let bg = config.background;
        pixmap.fill(Color::from_rgba8(bg.r, bg.g, bg.b, 255));

        let mut figure = Figure {
            config,
            pixmap,
            clip: None,
            texts: Vec::new(),
            fonts,
        };
        draw(&mut figure)?;
        figure.finish()
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn dpi(&self) -> u32 {
        self.config.dpi
    }

    /// Whole-figure rectangle.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0.0, 0.0, self.width() as f64, self.height() as f64)
    }

    /// Points to pixels at this figure's resolution.
    pub fn pt(&self, points: f64) -> f64 {
        points * self.config.dpi as f64 / 72.0
    }

    /// Pixel size of `text` once drawn with `style`.
    pub fn measure_text(&self, text: &str, style: &TextStyle) -> (f64, f64) {
        let size_px = self.pt(style.size_pt) as f32;
        let (w, h) = measure(self.fonts.get(style.weight), text, size_px);
        (w as f64, h as f64)
    }

    /// Restrict subsequent shape drawing to `rect`; `None` clears it.
    pub fn set_clip(&mut self, rect: Option<PixelRect>) -> RenderResult<()> {
        self.clip = match rect {
            None => None,
            Some(r) => {
                let mut mask = Mask::new(self.width(), self.height()).ok_or_else(|| {
                    RenderError::InvalidFigure("cannot allocate clip mask".to_string())
                })?;
                let path = PathBuilder::from_rect(to_skia_rect(r)?);
                mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
                Some(mask)
            }
        };
        Ok(())
    }

    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgb) -> RenderResult<()> {
        let paint = paint(color, 1.0, false);
        self.pixmap.fill_rect(
            to_skia_rect(rect)?,
            &paint,
            Transform::identity(),
            self.clip.as_ref(),
        );
        Ok(())
    }

    pub fn stroke_rect(&mut self, rect: PixelRect, style: &LineStyle) -> RenderResult<()> {
        let path = PathBuilder::from_rect(to_skia_rect(rect)?);
        let stroke = self.stroke(style);
        self.pixmap.stroke_path(
            &path,
            &paint(style.color, style.alpha, true),
            &stroke,
            Transform::identity(),
            self.clip.as_ref(),
        );
        Ok(())
    }

    /// Fill a closed polygon given in figure pixels.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgb) {
        if let Some(path) = build_path(points, true) {
            self.pixmap.fill_path(
                &path,
                &paint(color, 1.0, true),
                FillRule::EvenOdd,
                Transform::identity(),
                self.clip.as_ref(),
            );
        }
    }

    /// Stroke an open polyline given in figure pixels.
    pub fn stroke_polyline(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        if let Some(path) = build_path(points, false) {
            let stroke = self.stroke(style);
            self.pixmap.stroke_path(
                &path,
                &paint(style.color, style.alpha, true),
                &stroke,
                Transform::identity(),
                self.clip.as_ref(),
            );
        }
    }

    /// Overwrite a single opaque pixel. Out-of-range writes are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        let (w, h) = (self.width(), self.height());
        if x >= w || y >= h {
            return;
        }
        if let Some(px) = PremultipliedColorU8::from_rgba(color.r, color.g, color.b, 255) {
            self.pixmap.pixels_mut()[(y * w + x) as usize] = px;
        }
    }

    /// Queue text to draw after all shapes.
    pub fn text(&mut self, item: TextItem) {
        self.texts.push(item);
    }

    fn stroke(&self, style: &LineStyle) -> Stroke {
        let mut stroke = Stroke {
            width: self.pt(style.width_pt) as f32,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        if let Some((on, off)) = style.dash {
            stroke.dash = StrokeDash::new(vec![self.pt(on) as f32, self.pt(off) as f32], 0.0);
        }
        stroke
    }

    fn finish(self) -> RenderResult<RenderedFigure> {
        let (width, height) = (self.width(), self.height());

        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        let mut img = RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
            RenderError::InvalidFigure("pixel buffer does not match figure size".to_string())
        })?;

        for item in &self.texts {
            draw_text_item(&mut img, self.fonts, item, self.config.dpi as f64);
        }
        debug!(width, height, texts = self.texts.len(), "Flushed figure text");

        let png = create_png_auto(img.as_raw(), width as usize, height as usize, Some(self.config.dpi))?;
        Ok(RenderedFigure {
            width,
            height,
            dpi: self.config.dpi,
            png,
        })
    }
}

fn paint(color: Rgb, alpha: f64, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    paint.set_color_rgba8(color.r, color.g, color.b, a);
    paint.anti_alias = anti_alias;
    paint
}

fn to_skia_rect(r: PixelRect) -> RenderResult<Rect> {
    Rect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32)
        .ok_or_else(|| RenderError::InvalidFigure(format!("degenerate rectangle {:?}", r)))
}

fn build_path(points: &[(f64, f64)], close: bool) -> Option<tiny_skia::Path> {
    let (&(x0, y0), rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(x0 as f32, y0 as f32);
    for &(x, y) in rest {
        pb.line_to(x as f32, y as f32);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_figure_is_3000_by_1800() {
        assert_eq!(FigureConfig::default().pixel_size().unwrap(), (3000, 1800));
    }

    #[test]
    fn test_zero_size_figure_rejected() {
        let config = FigureConfig {
            width_in: 0.0,
            ..FigureConfig::default()
        };
        assert!(matches!(config.pixel_size(), Err(RenderError::InvalidFigure(_))));
    }

    #[test]
    fn test_build_path_needs_points() {
        assert!(build_path(&[], false).is_none());
        assert!(build_path(&[(0.0, 0.0), (10.0, 10.0)], false).is_some());
    }
}
