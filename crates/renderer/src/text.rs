//! TrueType text: font discovery and drawing onto the finished raster.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use rusttype::{Font, Scale};
use tracing::debug;

use crate::colormap::Rgb;
use crate::error::{RenderError, RenderResult};

/// DejaVu Sans, used when no system font loads.
const BUNDLED_REGULAR: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
const BUNDLED_BOLD: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// Regular-weight fonts tried in order when no path is configured.
pub const REGULAR_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Bold fonts tried in order; regular is used if none loads.
pub const BOLD_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Regular and bold faces used by a figure.
pub struct FontSet {
    regular: Font<'static>,
    bold: Option<Font<'static>>,
    source: PathBuf,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("source", &self.source)
            .field("has_bold", &self.bold.is_some())
            .finish()
    }
}

impl FontSet {
    /// Load fonts from `path`, or from the first well-known system location,
    /// falling back to the fonts compiled into the crate.
    ///
    /// An explicit path that cannot be read or parsed is an error; it does
    /// not fall back.
    pub fn load(path: Option<&Path>) -> RenderResult<Self> {
        let (regular, source) = match path {
            Some(p) => (read_font(p)?, p.to_path_buf()),
            None => {
                let system = REGULAR_FONT_PATHS
                    .iter()
                    .map(Path::new)
                    .find_map(|p| read_font(p).ok().map(|f| (f, p.to_path_buf())));
                match system {
                    Some(found) => found,
                    None => {
                        debug!("No system font found, using bundled DejaVu Sans");
                        return Self::bundled();
                    }
                }
            }
        };

        let bold = bold_candidates(&source)
            .into_iter()
            .find_map(|p| read_font(&p).ok());

        debug!(font = %source.display(), bold = bold.is_some(), "Loaded fonts");
        Ok(Self {
            regular,
            bold,
            source,
        })
    }

    /// The DejaVu Sans regular and bold faces compiled into the crate.
    pub fn bundled() -> RenderResult<Self> {
        let mut fonts = Self::from_bytes(BUNDLED_REGULAR.to_vec(), Some(BUNDLED_BOLD.to_vec()))?;
        fonts.source = PathBuf::from("<bundled>");
        Ok(fonts)
    }

    /// Build from in-memory font data.
    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> RenderResult<Self> {
        let regular = Font::try_from_vec(regular)
            .ok_or_else(|| RenderError::FontUnavailable("invalid font data".to_string()))?;
        let bold = bold.and_then(Font::try_from_vec);
        Ok(Self {
            regular,
            bold,
            source: PathBuf::from("<memory>"),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn get(&self, weight: FontWeight) -> &Font<'static> {
        match weight {
            FontWeight::Bold => self.bold.as_ref().unwrap_or(&self.regular),
            FontWeight::Regular => &self.regular,
        }
    }
}

fn read_font(path: &Path) -> RenderResult<Font<'static>> {
    let bytes = std::fs::read(path).map_err(|e| {
        RenderError::FontUnavailable(format!("cannot read {}: {}", path.display(), e))
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| {
        RenderError::FontUnavailable(format!("{} is not a TrueType font", path.display()))
    })
}

/// `Foo.ttf` / `Foo-Regular.ttf` -> `Foo-Bold.ttf`, then the system list.
fn bold_candidates(regular: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let (Some(stem), Some(ext)) = (
        regular.file_stem().and_then(|s| s.to_str()),
        regular.extension().and_then(|s| s.to_str()),
    ) {
        let base = stem.strip_suffix("-Regular").unwrap_or(stem);
        candidates.push(regular.with_file_name(format!("{}-Bold.{}", base, ext)));
    }
    candidates.extend(BOLD_FONT_PATHS.iter().map(PathBuf::from));
    candidates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_pt: f64,
    pub weight: FontWeight,
    pub color: Rgb,
    /// Filled box behind the text
    pub background: Option<Rgb>,
}

impl TextStyle {
    pub fn new(size_pt: f64) -> Self {
        Self {
            size_pt,
            weight: FontWeight::Regular,
            color: Rgb::BLACK,
            background: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }
}

/// Text anchored at a figure pixel. Lines split on `\n`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub style: TextStyle,
}

/// Size of a (possibly multi-line) block of text in pixels.
pub fn measure(font: &Font<'_>, text: &str, size_px: f32) -> (i32, i32) {
    let scale = Scale::uniform(size_px);
    let lines: Vec<&str> = text.lines().collect();
    let width = lines
        .iter()
        .map(|line| text_size(scale, font, line).0)
        .max()
        .unwrap_or(0);
    (width, line_height(font, scale) * lines.len() as i32)
}

fn line_height(font: &Font<'_>, scale: Scale) -> i32 {
    let v = font.v_metrics(scale);
    (v.ascent - v.descent + v.line_gap).ceil() as i32
}

/// Draw one text item, `dpi` converting points to pixels.
pub fn draw_text_item(img: &mut RgbaImage, fonts: &FontSet, item: &TextItem, dpi: f64) {
    let font = fonts.get(item.style.weight);
    let size_px = (item.style.size_pt * dpi / 72.0) as f32;
    let scale = Scale::uniform(size_px);
    let line_h = line_height(font, scale);
    let (block_w, block_h) = measure(font, &item.text, size_px);

    let top = match item.v_align {
        VAlign::Top => item.y,
        VAlign::Center => item.y - block_h as f64 / 2.0,
        VAlign::Bottom => item.y - block_h as f64,
    }
    .round() as i32;
    let block_left = align_x(item.x, block_w, item.h_align);

    if let Some(bg) = item.style.background {
        let pad = (size_px * 0.2).ceil() as i32;
        let rect = Rect::at(block_left - pad, top - pad)
            .of_size((block_w + 2 * pad).max(1) as u32, (block_h + 2 * pad).max(1) as u32);
        draw_filled_rect_mut(img, rect, Rgba(bg.to_rgba(255)));
    }

    let color = Rgba(item.style.color.to_rgba(255));
    for (i, line) in item.text.lines().enumerate() {
        let (w, _) = text_size(scale, font, line);
        let x = align_x(item.x, w, item.h_align);
        let y = top + i as i32 * line_h;
        draw_text_mut(img, color, x, y, scale, font, line);
    }
}

fn align_x(anchor: f64, width: i32, align: HAlign) -> i32 {
    let x = match align {
        HAlign::Left => anchor,
        HAlign::Center => anchor - width as f64 / 2.0,
        HAlign::Right => anchor - width as f64,
    };
    x.round() as i32
}
