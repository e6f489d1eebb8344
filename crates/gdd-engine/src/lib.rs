//! Growing Degree Day engine.
//!
//! Turns daily minimum/maximum temperature grids into a seasonal GDD
//! climatology:
//!
//! 1. [`normalize::subset`] restricts both grids to a bounding box
//! 2. [`normalize::to_celsius`] converts Kelvin to Celsius
//! 3. [`gdd::compute_gdd`] computes daily `max(0, mean - base)`
//! 4. [`season::filter_season`] keeps the season window
//! 5. [`season::aggregate_seasonal`] sums each year
//! 6. [`season::average_over_years`] averages the years
//!
//! [`pipeline::run_pipeline`] chains the steps and logs each stage's shape.
//! [`loader::load_field_window`] with [`PipelineConfig::read_window`] keeps
//! the read down to the cells those steps use.

pub mod field;
pub mod gdd;
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod season;

pub use field::{Climatology, GriddedField, SeasonalField, Units};
pub use gdd::{compute_gdd, DEFAULT_BASE_TEMP_C};
pub use loader::{field_from_grid, load_field, load_field_window};
pub use netcdf_parser::ReadWindow;
pub use normalize::{select, subset, to_celsius, KELVIN_OFFSET};
pub use pipeline::{run_pipeline, PipelineConfig, PipelineOutput, StageShape};
pub use season::{aggregate_seasonal, average_over_years, filter_season};
