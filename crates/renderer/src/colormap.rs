//! Colormaps for filled contour bands.

use colorous::Gradient;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const GRAY: Rgb = Rgb::new(128, 128, 128);
    pub const LIGHT_GRAY: Rgb = Rgb::new(211, 211, 211);
    /// Natural Earth style water
    pub const OCEAN: Rgb = Rgb::new(152, 183, 226);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl From<colorous::Color> for Rgb {
    fn from(c: colorous::Color) -> Self {
        Rgb::new(c.r, c.g, c.b)
    }
}

/// A continuous colormap with an "under" color for values below range.
#[derive(Clone, Copy)]
pub struct Colormap {
    gradient: Gradient,
    reversed: bool,
    under: Rgb,
}

impl std::fmt::Debug for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Colormap")
            .field("reversed", &self.reversed)
            .field("under", &self.under)
            .finish()
    }
}

impl Colormap {
    pub fn new(gradient: Gradient, reversed: bool, under: Rgb) -> Self {
        Self {
            gradient,
            reversed,
            under,
        }
    }

    /// Reversed Spectral: blue for low values, red for high, light gray under.
    pub fn spectral_r() -> Self {
        Self::new(colorous::SPECTRAL, true, Rgb::LIGHT_GRAY)
    }

    /// Color at normalized position `t`, clamped to `[0, 1]`.
    pub fn eval(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let t = if self.reversed { 1.0 - t } else { t };
        self.gradient.eval_continuous(t).into()
    }

    pub fn under(&self) -> Rgb {
        self.under
    }
}

/// One color per band between consecutive levels.
///
/// Each band takes the colormap color at its midpoint, normalized to
/// `[0, vmax]` where `vmax` is the data maximum. The top band's midpoint can
/// lie above `vmax`; it clamps to the end of the colormap.
pub fn band_colors(levels: &[f64], vmax: f64, cmap: &Colormap) -> Vec<Rgb> {
    levels
        .windows(2)
        .map(|w| {
            let mid = (w[0] + w[1]) / 2.0;
            let t = if vmax > 0.0 { mid / vmax } else { 0.0 };
            cmap.eval(t)
        })
        .collect()
}
