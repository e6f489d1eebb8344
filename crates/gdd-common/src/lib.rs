//! Common types and utilities shared across the GDD workspace crates.

pub mod bbox;
pub mod error;
pub mod grid;
pub mod time;

pub use bbox::BoundingBox;
pub use error::{GddError, GddResult};
pub use grid::{AxisOrder, CoordAxis, CoordSlice};
pub use time::SeasonWindow;
