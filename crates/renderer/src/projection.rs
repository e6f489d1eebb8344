//! Plate Carrée (equirectangular) map axes.
//!
//! Longitude and latitude map linearly to pixels with one degree of either
//! taking the same number of pixels.

use gdd_common::BoundingBox;

/// Pixel rectangle in figure coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Largest rectangle of the given width/height ratio centred in `self`.
    pub fn fit_aspect(&self, aspect: f64) -> PixelRect {
        if self.width / self.height > aspect {
            let width = self.height * aspect;
            PixelRect::new(self.x + (self.width - width) / 2.0, self.y, width, self.height)
        } else {
            let height = self.width / aspect;
            PixelRect::new(self.x, self.y + (self.height - height) / 2.0, self.width, height)
        }
    }

    /// Point at axes fraction `(fx, fy)`, with `fy = 0` at the bottom edge.
    pub fn at_fraction(&self, fx: f64, fy: f64) -> (f64, f64) {
        (self.x + fx * self.width, self.bottom() - fy * self.height)
    }
}

/// An equal-aspect lon/lat axes placed inside a figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateCarree {
    extent: BoundingBox,
    rect: PixelRect,
}

impl PlateCarree {
    /// Fit `extent` into `available`, keeping degrees square.
    pub fn fit(extent: BoundingBox, available: PixelRect) -> Self {
        let rect = available.fit_aspect(extent.width() / extent.height());
        Self { extent, rect }
    }

    pub fn extent(&self) -> &BoundingBox {
        &self.extent
    }

    /// Axes rectangle in figure pixels.
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Pixels per degree (equal on both axes).
    pub fn scale(&self) -> f64 {
        self.rect.width / self.extent.width()
    }

    /// Figure pixel for a lon/lat point.
    pub fn to_pixel(&self, lon: f64, lat: f64) -> (f64, f64) {
        let x = self.rect.x + (lon - self.extent.min_x) / self.extent.width() * self.rect.width;
        let y = self.rect.y + (self.extent.max_y - lat) / self.extent.height() * self.rect.height;
        (x, y)
    }

    /// Lon/lat for a figure pixel.
    pub fn to_geo(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = self.extent.min_x + (x - self.rect.x) / self.rect.width * self.extent.width();
        let lat = self.extent.max_y - (y - self.rect.y) / self.rect.height * self.extent.height();
        (lon, lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_keeps_degrees_square() {
        let bbox = BoundingBox::new(-125.0, 45.0, -117.0, 49.0);
        let axes = PlateCarree::fit(bbox, PixelRect::new(0.0, 0.0, 1000.0, 1000.0));
        let rect = axes.rect();
        assert_eq!(rect.width, 1000.0);
        assert_eq!(rect.height, 500.0);
        assert_eq!(rect.y, 250.0);
        assert_eq!(axes.scale(), 125.0);
    }

    #[test]
    fn test_pixel_roundtrip_corners() {
        let bbox = BoundingBox::new(-125.0, 45.0, -117.0, 49.0);
        let axes = PlateCarree::fit(bbox, PixelRect::new(10.0, 20.0, 800.0, 400.0));
        assert_eq!(axes.to_pixel(-125.0, 49.0), (10.0, 20.0));
        assert_eq!(axes.to_pixel(-117.0, 45.0), (810.0, 420.0));
        let (lon, lat) = axes.to_geo(410.0, 220.0);
        assert!((lon + 121.0).abs() < 1e-9);
        assert!((lat - 47.0).abs() < 1e-9);
    }

    #[test]
    fn test_at_fraction_is_bottom_up() {
        let rect = PixelRect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(rect.at_fraction(0.0, 0.0), (100.0, 200.0));
        assert_eq!(rect.at_fraction(0.5, 1.0), (200.0, 100.0));
    }
}
