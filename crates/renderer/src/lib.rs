//! Static map rendering for gridded GDD climatologies.
//!
//! - [`contour`]: levels, masking and filled-band rasterization
//! - [`colormap`]: reversed Spectral with a light-gray "under" color
//! - [`projection`]: equal-aspect Plate Carrée axes
//! - [`features`]: embedded coastline, ocean and border outlines
//! - [`figure`]: the explicit figure context and PNG output
//! - [`map`]: the complete GDD map layout

pub mod colorbar;
pub mod colormap;
pub mod contour;
pub mod display;
pub mod error;
pub mod features;
pub mod figure;
pub mod map;
pub mod png;
pub mod projection;
pub mod text;
pub mod ticks;

pub use colormap::{Colormap, Rgb};
pub use contour::{contour_levels, mask_non_positive, DEFAULT_LEVEL_STEP};
pub use display::open_in_viewer;
pub use error::{RenderError, RenderResult};
pub use figure::{Figure, FigureConfig, RenderedFigure};
pub use map::{render_map, MapGrid, MapOptions};
pub use text::FontSet;
