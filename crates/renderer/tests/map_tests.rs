//! End-to-end map rendering tests, drawn with the bundled DejaVu fonts.

use std::collections::HashSet;

use gdd_common::{BoundingBox, CoordAxis};
use ndarray::Array2;
use renderer::colormap::band_colors;
use renderer::contour::contour_levels;
use renderer::figure::{Figure, FigureConfig, LineStyle};
use renderer::projection::PixelRect;
use renderer::{render_map, Colormap, FontSet, MapGrid, MapOptions, RenderError, Rgb};
use test_utils::fixtures::grid::WASHINGTON_COARSE;

fn fonts() -> FontSet {
    FontSet::bundled().unwrap()
}

/// A small figure so tests stay fast.
fn small_figure() -> FigureConfig {
    FigureConfig {
        width_in: 5.0,
        height_in: 3.0,
        dpi: 100,
        ..FigureConfig::default()
    }
}

fn axes() -> (CoordAxis, CoordAxis) {
    let spec = WASHINGTON_COARSE;
    (
        CoordAxis::new("lat", spec.lat()).unwrap(),
        CoordAxis::new("lon", spec.lon()).unwrap(),
    )
}

#[test]
fn test_render_map_banded_gradient() {
    let fonts = fonts();
    let (lat, lon) = axes();
    // West-to-east ramp from 10 to 190
    let values = Array2::from_shape_fn((lat.len(), lon.len()), |(_, j)| 10.0 + 20.0 * j as f64);
    let grid = MapGrid {
        lat: &lat,
        lon: &lon,
        values: values.view(),
    };
    let options = MapOptions {
        figure: small_figure(),
        ..MapOptions::default()
    };

    let figure = render_map(&grid, &options, &fonts).unwrap();
    assert_eq!((figure.width, figure.height), (500, 300));
    assert_eq!(figure.dpi, 100);

    let img = image::load_from_memory(&figure.png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (500, 300));

    let levels = contour_levels(190.0, 25.0).unwrap();
    let colors: HashSet<[u8; 4]> = band_colors(&levels, 190.0, &Colormap::spectral_r())
        .into_iter()
        .map(|c| c.to_rgba(255))
        .collect();
    let seen: HashSet<[u8; 4]> = img
        .pixels()
        .map(|p| p.0)
        .filter(|p| colors.contains(p))
        .collect();
    assert!(seen.len() >= 5, "expected most bands drawn, saw {}", seen.len());

    // Corners are outside the axes and stay background
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(499, 299).0, [255, 255, 255, 255]);
}

#[test]
fn test_render_map_saves_png() {
    let fonts = fonts();
    let (lat, lon) = axes();
    let values = Array2::from_elem((lat.len(), lon.len()), 172.0);
    let grid = MapGrid {
        lat: &lat,
        lon: &lon,
        values: values.view(),
    };
    let options = MapOptions {
        figure: small_figure(),
        ..MapOptions::default()
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Washington_GDD_Map_Jan_Apr.png");
    render_map(&grid, &options, &fonts)
        .unwrap()
        .save(&path)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], &renderer::png::PNG_SIGNATURE);
    assert!(image::load_from_memory(&bytes).is_ok());
}

#[test]
fn test_render_map_without_positive_data() {
    let fonts = fonts();
    let (lat, lon) = axes();
    let values = Array2::from_shape_fn((lat.len(), lon.len()), |(i, _)| -(i as f64));
    let grid = MapGrid {
        lat: &lat,
        lon: &lon,
        values: values.view(),
    };
    let err = render_map(&grid, &MapOptions::default(), &fonts).unwrap_err();
    assert!(matches!(err, RenderError::NoData(_)));
}

#[test]
fn test_render_map_rejects_mismatched_axes() {
    let fonts = fonts();
    let (lat, lon) = axes();
    let values = Array2::from_elem((2, 2), 50.0);
    let grid = MapGrid {
        lat: &lat,
        lon: &lon,
        values: values.view(),
    };
    let err = render_map(&grid, &MapOptions::default(), &fonts).unwrap_err();
    assert!(matches!(err, RenderError::InvalidFigure(_)));
}

#[test]
fn test_render_map_outside_extent_draws_no_bands() {
    let fonts = fonts();
    let (lat, lon) = axes();
    let values = Array2::from_elem((lat.len(), lon.len()), 100.0);
    let grid = MapGrid {
        lat: &lat,
        lon: &lon,
        values: values.view(),
    };
    let options = MapOptions {
        extent: BoundingBox::new(-80.0, 30.0, -70.0, 35.0),
        figure: small_figure(),
        ..MapOptions::default()
    };

    let figure = render_map(&grid, &options, &fonts).unwrap();
    let img = image::load_from_memory(&figure.png).unwrap().to_rgba8();
    let band = band_colors(&contour_levels(100.0, 25.0).unwrap(), 100.0, &Colormap::spectral_r());
    let band_pixels: HashSet<[u8; 4]> = band.iter().map(|c| c.to_rgba(255)).collect();
    // The colorbar still shows every band; the axes interior must not.
    let (w, h) = img.dimensions();
    let center = img.get_pixel(w / 2, h / 3).0;
    assert!(!band_pixels.contains(&center));
}

#[test]
fn test_figure_render_propagates_draw_errors() {
    let fonts = fonts();
    let result = Figure::render(small_figure(), &fonts, |_fig| {
        Err(RenderError::InvalidFigure("stop".to_string()))
    });
    assert!(matches!(result, Err(RenderError::InvalidFigure(_))));
}

#[test]
fn test_figure_shapes_and_clip() {
    let fonts = fonts();
    let figure = Figure::render(small_figure(), &fonts, |fig| {
        fig.set_clip(Some(PixelRect::new(0.0, 0.0, 250.0, 300.0)))?;
        fig.fill_rect(PixelRect::new(0.0, 0.0, 500.0, 300.0), Rgb::OCEAN)?;
        fig.set_clip(None)?;
        fig.stroke_polyline(&[(0.0, 150.0), (500.0, 150.0)], &LineStyle::solid(Rgb::BLACK, 2.0));
        Ok(())
    })
    .unwrap();

    let img = image::load_from_memory(&figure.png).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(100, 50).0, Rgb::OCEAN.to_rgba(255));
    assert_eq!(img.get_pixel(400, 50).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(400, 150).0, [0, 0, 0, 255]);
}
