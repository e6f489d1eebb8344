//! Filled-contour GDD map on a Plate Carrée axes.
//!
//! Layout, top to bottom: bold title, subtitle just above the axes, the map
//! with gridline labels on the left and bottom, then a horizontal colorbar
//! half the axes width.

use gdd_common::{BoundingBox, CoordAxis};
use ndarray::ArrayView2;
use tracing::debug;

use crate::colorbar::Colorbar;
use crate::colormap::{band_colors, Colormap, Rgb};
use crate::contour::{contour_levels, fill_bands, Band, MaskedGrid, DEFAULT_LEVEL_STEP};
use crate::error::{RenderError, RenderResult};
use crate::features::{features_in, FeatureKind};
use crate::figure::{Figure, FigureConfig, LineStyle, RenderedFigure};
use crate::projection::{PixelRect, PlateCarree};
use crate::text::{FontSet, HAlign, TextItem, TextStyle, VAlign};
use crate::ticks::{decimals_for, format_latitude, format_longitude, max_n_ticks};

/// Outer figure margin in points.
const MARGIN_PT: f64 = 12.0;
/// Gap between title and axes in points.
const TITLE_PAD_PT: f64 = 20.0;
/// Gap between axes edge and gridline labels in points.
const LABEL_PAD_PT: f64 = 5.0;
/// Colorbar width as a fraction of the axes width.
const COLORBAR_SHRINK: f64 = 0.5;
/// Colorbar length / thickness.
const COLORBAR_ASPECT: f64 = 20.0;

/// A `(lat, lon)` grid of values to contour.
#[derive(Debug, Clone, Copy)]
pub struct MapGrid<'a> {
    pub lat: &'a CoordAxis,
    pub lon: &'a CoordAxis,
    pub values: ArrayView2<'a, f64>,
}

/// Everything about the map that is not data.
#[derive(Debug, Clone)]
pub struct MapOptions {
    pub extent: BoundingBox,
    pub title: String,
    pub subtitle: String,
    pub annotation: String,
    pub colorbar_label: String,
    pub level_step: f64,
    pub cmap: Colormap,
    pub figure: FigureConfig,
    pub lon_bins: usize,
    pub lat_bins: usize,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            extent: BoundingBox::WASHINGTON,
            title: "Growing Degree Day Accumulation Jan-April\n(1991-2020) Washington State at 0°C"
                .to_string(),
            subtitle: "Bud Break & Flowering".to_string(),
            annotation: "Data Source: Gridmet".to_string(),
            colorbar_label: "Growing Degree Days (GDD)".to_string(),
            level_step: DEFAULT_LEVEL_STEP,
            cmap: Colormap::spectral_r(),
            figure: FigureConfig::default(),
            lon_bins: 8,
            lat_bins: 6,
        }
    }
}

fn title_style() -> TextStyle {
    TextStyle::new(14.0).bold()
}

fn subtitle_style() -> TextStyle {
    TextStyle::new(10.0)
}

fn grid_label_style() -> TextStyle {
    TextStyle::new(10.0).color(Rgb::GRAY)
}

/// Render the map to an in-memory PNG.
pub fn render_map(
    grid: &MapGrid<'_>,
    options: &MapOptions,
    fonts: &FontSet,
) -> RenderResult<RenderedFigure> {
    let (n_lat, n_lon) = grid.values.dim();
    if n_lat != grid.lat.len() || n_lon != grid.lon.len() {
        return Err(RenderError::InvalidFigure(format!(
            "values are {}x{} but axes are lat={} lon={}",
            n_lat,
            n_lon,
            grid.lat.len(),
            grid.lon.len()
        )));
    }
    if !options.extent.is_valid() {
        return Err(RenderError::InvalidFigure(format!(
            "invalid map extent {:?}",
            options.extent
        )));
    }

    let masked = MaskedGrid::from_values(grid.values);
    let max = masked
        .max()
        .ok_or_else(|| RenderError::NoData("every cell is missing or not above zero".to_string()))?;
    let levels = contour_levels(max, options.level_step)?;
    let colors = band_colors(&levels, max, &options.cmap);
    debug!(max, levels = levels.len(), "Contour levels");

    Figure::render(options.figure, fonts, |fig| {
        let colorbar = Colorbar {
            levels: &levels,
            colors: &colors,
            label: &options.colorbar_label,
            tick_style: TextStyle::new(10.0),
            label_style: TextStyle::new(12.0),
        };
        let layout = Layout::compute(fig, options, &colorbar);
        let axes = layout.axes;
        let rect = axes.rect();

        fig.set_clip(Some(rect))?;
        draw_polygons(fig, &axes, FeatureKind::Ocean, Rgb::OCEAN);
        draw_polygons(fig, &axes, FeatureKind::Island, options.figure.background);
        draw_bands(fig, &axes, grid, &masked, &levels, &colors, &options.cmap);
        draw_lines(fig, &axes, FeatureKind::Coastline, &LineStyle::solid(Rgb::BLACK, 0.8));
        draw_lines(fig, &axes, FeatureKind::Border, &LineStyle::solid(Rgb::BLACK, 0.6));
        draw_gridlines(fig, &axes, options);
        fig.set_clip(None)?;
        fig.stroke_rect(rect, &LineStyle::solid(Rgb::BLACK, 0.8))?;

        let (ax, ay) = rect.at_fraction(0.01, 0.03);
        fig.text(TextItem {
            text: options.annotation.clone(),
            x: ax,
            y: ay,
            h_align: HAlign::Left,
            v_align: VAlign::Bottom,
            style: TextStyle::new(10.0).background(Rgb::WHITE),
        });

        let (sx, sy) = rect.at_fraction(0.5, 1.01);
        fig.text(TextItem {
            text: options.subtitle.clone(),
            x: sx,
            y: sy,
            h_align: HAlign::Center,
            v_align: VAlign::Bottom,
            style: subtitle_style(),
        });

        fig.text(TextItem {
            text: options.title.clone(),
            x: rect.center_x(),
            y: rect.y - fig.pt(TITLE_PAD_PT),
            h_align: HAlign::Center,
            v_align: VAlign::Bottom,
            style: title_style(),
        });

        colorbar.draw(fig, layout.colorbar)
    })
}

/// Pixel placement of the axes and colorbar.
#[derive(Debug, Clone, Copy)]
struct Layout {
    axes: PlateCarree,
    colorbar: PixelRect,
}

impl Layout {
    fn compute(fig: &Figure<'_>, options: &MapOptions, colorbar: &Colorbar<'_>) -> Self {
        let bounds = fig.bounds();
        let margin = fig.pt(MARGIN_PT);
        let label_pad = fig.pt(LABEL_PAD_PT);

        let (_, title_h) = fig.measure_text(&options.title, &title_style());
        let (_, subtitle_h) = fig.measure_text(&options.subtitle, &subtitle_style());
        let top = margin + (title_h + fig.pt(TITLE_PAD_PT)).max(subtitle_h + label_pad);

        let label_style = grid_label_style();
        let (lat_label_w, _) = fig.measure_text("00°N", &label_style);
        let (_, lon_label_h) = fig.measure_text("000°W", &label_style);
        let left = margin + lat_label_w + label_pad;
        let right = margin + lat_label_w / 2.0;

        let available_w = bounds.width - left - right;
        let bar_w_estimate = available_w * COLORBAR_SHRINK;
        let bar_h = bar_w_estimate / COLORBAR_ASPECT;
        let bar_gap = label_pad + lon_label_h + fig.pt(8.0);
        let bottom = margin + colorbar.decoration_height(fig) + bar_h + bar_gap;

        let available = PixelRect::new(left, top, available_w, bounds.height - top - bottom);
        let axes = PlateCarree::fit(options.extent, available);
        let rect = axes.rect();

        let bar_w = rect.width * COLORBAR_SHRINK;
        let colorbar = PixelRect::new(
            rect.center_x() - bar_w / 2.0,
            rect.bottom() + bar_gap,
            bar_w,
            bar_h,
        );
        debug!(axes = ?rect, colorbar = ?colorbar, "Figure layout");
        Self { axes, colorbar }
    }
}

fn project(axes: &PlateCarree, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|&(lon, lat)| axes.to_pixel(lon, lat))
        .collect()
}

fn draw_polygons(fig: &mut Figure<'_>, axes: &PlateCarree, kind: FeatureKind, color: Rgb) {
    for feature in features_in(axes.extent(), kind) {
        fig.fill_polygon(&project(axes, feature.points), color);
    }
}

fn draw_lines(fig: &mut Figure<'_>, axes: &PlateCarree, kind: FeatureKind, style: &LineStyle) {
    for feature in features_in(axes.extent(), kind) {
        fig.stroke_polyline(&project(axes, feature.points), style);
    }
}

fn draw_bands(
    fig: &mut Figure<'_>,
    axes: &PlateCarree,
    grid: &MapGrid<'_>,
    masked: &MaskedGrid,
    levels: &[f64],
    colors: &[Rgb],
    cmap: &Colormap,
) {
    let rect = axes.rect();
    let x0 = rect.x.round().max(0.0) as u32;
    let y0 = rect.y.round().max(0.0) as u32;
    let width = rect.width.round() as usize;
    let height = rect.height.round() as usize;

    let raster = fill_bands(masked, levels, width, height, |x, y| {
        let (lon, lat) = axes.to_geo(x0 as f64 + x, y0 as f64 + y);
        let row = grid.lat.fractional_index(lat)?;
        let col = grid.lon.fractional_index(lon)?;
        Some((row, col))
    });

    for y in 0..height {
        for x in 0..width {
            let color = match raster.get(x, y) {
                Some(Band::Level(i)) => colors.get(i).copied(),
                Some(Band::Under) => Some(cmap.under()),
                Some(Band::Over) | None => None,
            };
            if let Some(color) = color {
                fig.put_pixel(x0 + x as u32, y0 + y as u32, color);
            }
        }
    }
}

fn draw_gridlines(fig: &mut Figure<'_>, axes: &PlateCarree, options: &MapOptions) {
    let extent = *axes.extent();
    let rect = axes.rect();
    let style = LineStyle::solid(Rgb::GRAY, 0.5).dashed(2.0, 2.0).alpha(0.5);
    let label_style = grid_label_style();
    let pad = fig.pt(LABEL_PAD_PT);

    let lon_ticks = max_n_ticks(extent.min_x, extent.max_x, options.lon_bins);
    let lon_decimals = decimals_for(lon_ticks.step);
    for &lon in &lon_ticks.values {
        let (x, _) = axes.to_pixel(lon, extent.min_y);
        fig.stroke_polyline(&[(x, rect.y), (x, rect.bottom())], &style);
        fig.text(TextItem {
            text: format_longitude(lon, lon_decimals),
            x,
            y: rect.bottom() + pad,
            h_align: HAlign::Center,
            v_align: VAlign::Top,
            style: label_style,
        });
    }

    let lat_ticks = max_n_ticks(extent.min_y, extent.max_y, options.lat_bins);
    let lat_decimals = decimals_for(lat_ticks.step);
    for &lat in &lat_ticks.values {
        let (_, y) = axes.to_pixel(extent.min_x, lat);
        fig.stroke_polyline(&[(rect.x, y), (rect.right(), y)], &style);
        fig.text(TextItem {
            text: format_latitude(lat, lat_decimals),
            x: rect.x - pad,
            y,
            h_align: HAlign::Right,
            v_align: VAlign::Center,
            style: label_style,
        });
    }
}
