//! Common test fixtures for GDD tests.
//!
//! Plain tuples and numbers only, so any crate in the workspace can use them
//! without pulling in the engine types.

/// Bounding boxes as `(min_lon, min_lat, max_lon, max_lat)`.
pub mod bbox {
    /// Washington State
    pub const WASHINGTON: (f64, f64, f64, f64) = (-124.736342, 45.521208, -116.945392, 49.382808);

    /// Entirely outside any CONUS grid
    pub const SOUTH_PACIFIC: (f64, f64, f64, f64) = (-150.0, -40.0, -140.0, -30.0);
}

/// Grid layouts for synthetic datasets.
pub mod grid {
    /// A coarse grid covering Washington with a margin on every side.
    ///
    /// Latitude runs north to south as in gridMET files.
    pub const WASHINGTON_COARSE: GridSpec = GridSpec {
        n_lat: 8,
        n_lon: 10,
        north: 50.0,
        west: -125.5,
        step: 1.0,
    };

    /// Regular lat/lon grid with descending latitude.
    #[derive(Debug, Clone, Copy)]
    pub struct GridSpec {
        pub n_lat: usize,
        pub n_lon: usize,
        /// Latitude of the first row
        pub north: f64,
        /// Longitude of the first column
        pub west: f64,
        pub step: f64,
    }

    impl GridSpec {
        /// Returns the number of cells in one daily slice.
        pub fn cells(&self) -> usize {
            self.n_lat * self.n_lon
        }

        /// Latitudes from north to south.
        pub fn lat(&self) -> Vec<f64> {
            (0..self.n_lat)
                .map(|i| self.north - i as f64 * self.step)
                .collect()
        }

        /// Longitudes from west to east.
        pub fn lon(&self) -> Vec<f64> {
            (0..self.n_lon)
                .map(|j| self.west + j as f64 * self.step)
                .collect()
        }
    }
}

/// Temperatures used by the scenario tests.
pub mod temps {
    /// 10 °C in Kelvin
    pub const TEN_C_K: f64 = 283.15;

    /// 20 °C in Kelvin
    pub const TWENTY_C_K: f64 = 293.15;

    /// gridMET packs temperatures as shorts with this scale factor
    pub const GRIDMET_SCALE: f64 = 0.1;

    /// gridMET `add_offset` for packed temperatures
    pub const GRIDMET_OFFSET: f64 = 220.0;

    /// gridMET `_FillValue` for packed temperatures
    pub const GRIDMET_FILL: f64 = 32767.0;
}
