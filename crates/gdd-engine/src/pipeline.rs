//! End-to-end GDD pipeline: subset, convert, compute, filter, aggregate, average.

use gdd_common::{BoundingBox, GddResult, SeasonWindow};
use netcdf_parser::ReadWindow;
use tracing::info;

use crate::field::{Climatology, GriddedField};
use crate::gdd::{compute_gdd, DEFAULT_BASE_TEMP_C};
use crate::normalize::{subset, to_celsius};
use crate::season::{aggregate_seasonal, average_over_years, filter_season};

/// Fixed parameters of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub bbox: BoundingBox,
    pub base_temp: f64,
    pub window: SeasonWindow,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bbox: BoundingBox::WASHINGTON,
            base_temp: DEFAULT_BASE_TEMP_C,
            window: SeasonWindow::JAN_APR_1991_2020,
        }
    }
}

impl PipelineConfig {
    /// The smallest read that still feeds every stage: the bounding box and
    /// the season's absolute date range.
    ///
    /// Subsetting and filtering a field loaded through this window gives the
    /// same result as doing so on the full dataset.
    pub fn read_window(&self) -> ReadWindow {
        ReadWindow {
            bbox: Some(self.bbox),
            dates: self.window.first_date().zip(self.window.last_date()),
        }
    }
}

/// Shape of an intermediate array, reported for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageShape {
    pub stage: &'static str,
    pub dims: Vec<(&'static str, usize)>,
}

impl StageShape {
    fn new(stage: &'static str, dims: Vec<(&'static str, usize)>) -> Self {
        let shape = Self { stage, dims };
        info!(stage = shape.stage, shape = %shape.describe(), "Stage shape");
        shape
    }

    fn daily(stage: &'static str, field: &GriddedField) -> Self {
        let (day, lat, lon) = field.shape();
        Self::new(stage, vec![("day", day), ("lat", lat), ("lon", lon)])
    }

    /// `(day: 3, lat: 2, lon: 2)` style rendering.
    pub fn describe(&self) -> String {
        let parts: Vec<String> = self
            .dims
            .iter()
            .map(|(name, len)| format!("{}: {}", name, len))
            .collect();
        format!("({})", parts.join(", "))
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub climatology: Climatology,
    pub stages: Vec<StageShape>,
}

/// Run the GDD pipeline on Kelvin tmin/tmax fields.
pub fn run_pipeline(
    tmin: &GriddedField,
    tmax: &GriddedField,
    config: &PipelineConfig,
) -> GddResult<PipelineOutput> {
    let tmax_subset = to_celsius(&subset(tmax, &config.bbox)?);
    let tmin_subset = to_celsius(&subset(tmin, &config.bbox)?);

    let mut stages = vec![
        StageShape::daily("tmax_subset", &tmax_subset),
        StageShape::daily("tmin_subset", &tmin_subset),
    ];

    let gdd_subset = compute_gdd(&tmin_subset, &tmax_subset, config.base_temp)?;
    stages.push(StageShape::daily("gdd_subset", &gdd_subset));

    let gdd_filtered = filter_season(&gdd_subset, &config.window)?;
    stages.push(StageShape::daily("gdd_filtered", &gdd_filtered));

    let seasonal = aggregate_seasonal(&gdd_filtered);
    let (year, lat, lon) = seasonal.shape();
    stages.push(StageShape::new(
        "seasonal_gdd",
        vec![("year", year), ("lat", lat), ("lon", lon)],
    ));

    let climatology = average_over_years(&seasonal);
    let (lat, lon) = climatology.shape();
    stages.push(StageShape::new(
        "average_seasonal_gdd",
        vec![("lat", lat), ("lon", lon)],
    ));

    Ok(PipelineOutput {
        climatology,
        stages,
    })
}
