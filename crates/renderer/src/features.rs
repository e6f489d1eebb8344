//! Embedded geographic outlines for the Pacific Northwest.
//!
//! Simplified to vertices a few tenths of a degree apart so they stay small enough to compile in.
//! Points are `(lon, lat)`.

use gdd_common::BoundingBox;

/// How a feature is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Filled water body
    Ocean,
    /// Land drawn over water
    Island,
    /// Shoreline stroke
    Coastline,
    /// State or national border stroke
    Border,
}

#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub name: &'static str,
    pub kind: FeatureKind,
    pub points: &'static [(f64, f64)],
}

impl Feature {
    /// Whether any part of the outline's bounding box touches `bbox`.
    pub fn intersects(&self, bbox: &BoundingBox) -> bool {
        let mut bounds = BoundingBox::new(f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for &(lon, lat) in self.points {
            bounds.min_x = bounds.min_x.min(lon);
            bounds.min_y = bounds.min_y.min(lat);
            bounds.max_x = bounds.max_x.max(lon);
            bounds.max_y = bounds.max_y.max(lat);
        }
        !self.points.is_empty() && bounds.intersects(bbox)
    }
}

/// Outer coast from the Oregon coast to Cape Flattery, then along the Strait
/// of Juan de Fuca, around Puget Sound and up the mainland to the Fraser.
const MAINLAND_COAST: &[(f64, f64)] = &[
    (-124.08, 44.50),
    (-124.05, 45.00),
    (-123.97, 45.50),
    (-123.96, 45.89),
    (-123.93, 46.23),
    (-124.06, 46.27),
    (-124.07, 46.64),
    (-124.10, 46.86),
    (-124.16, 47.00),
    (-124.30, 47.35),
    (-124.47, 47.70),
    (-124.63, 47.92),
    (-124.69, 48.17),
    (-124.73, 48.38),
    (-124.62, 48.37),
    (-124.26, 48.25),
    (-123.43, 48.12),
    (-123.10, 48.15),
    (-122.76, 48.12),
    (-122.68, 47.95),
    (-122.55, 47.60),
    (-122.60, 47.30),
    (-122.90, 47.10),
    (-122.45, 47.25),
    (-122.35, 47.60),
    (-122.30, 47.95),
    (-122.50, 48.30),
    (-122.60, 48.55),
    (-122.50, 48.75),
    (-122.75, 49.00),
    (-123.10, 49.05),
    (-123.25, 49.30),
    (-123.50, 49.50),
    (-123.95, 49.80),
];

const VANCOUVER_ISLAND: &[(f64, f64)] = &[
    (-123.30, 48.42),
    (-123.55, 48.33),
    (-124.00, 48.40),
    (-124.40, 48.55),
    (-124.75, 48.62),
    (-125.20, 48.80),
    (-125.60, 49.00),
    (-126.00, 49.30),
    (-126.50, 49.60),
    (-125.60, 50.00),
    (-125.00, 49.80),
    (-124.20, 49.40),
    (-123.80, 49.05),
    (-123.55, 48.80),
    (-123.35, 48.60),
    (-123.30, 48.42),
];

/// Columbia River from its mouth to the 46th parallel.
const WA_OR_BORDER: &[(f64, f64)] = &[
    (-124.00, 46.25),
    (-123.83, 46.19),
    (-123.20, 46.15),
    (-122.95, 46.10),
    (-122.80, 45.85),
    (-122.75, 45.65),
    (-122.25, 45.55),
    (-121.50, 45.70),
    (-121.20, 45.60),
    (-120.60, 45.75),
    (-120.00, 45.85),
    (-119.30, 45.93),
    (-118.98, 46.00),
    (-116.92, 46.00),
];

/// Snake River to Lewiston, then due north to Canada.
const WA_ID_BORDER: &[(f64, f64)] = &[
    (-116.92, 46.00),
    (-117.04, 46.42),
    (-117.04, 49.00),
];

/// Snake River south through Hells Canyon.
const OR_ID_BORDER: &[(f64, f64)] = &[
    (-116.92, 46.00),
    (-116.70, 45.80),
    (-116.46, 45.60),
    (-116.68, 45.30),
    (-116.85, 45.00),
    (-117.00, 44.50),
];

/// 49th parallel, plus the water boundary through Haro Strait.
const CANADA_BORDER: &[(f64, f64)] = &[
    (-124.75, 48.50),
    (-123.30, 48.28),
    (-123.20, 48.55),
    (-123.05, 48.80),
    (-123.05, 49.00),
    (-116.00, 49.00),
];

/// Ocean polygon: the mainland coast closed off to the west, beyond any
/// Washington map extent.
const PACIFIC: &[(f64, f64)] = &[
    (-124.08, 44.50),
    (-124.05, 45.00),
    (-123.97, 45.50),
    (-123.96, 45.89),
    (-123.93, 46.23),
    (-124.06, 46.27),
    (-124.07, 46.64),
    (-124.10, 46.86),
    (-124.16, 47.00),
    (-124.30, 47.35),
    (-124.47, 47.70),
    (-124.63, 47.92),
    (-124.69, 48.17),
    (-124.73, 48.38),
    (-124.62, 48.37),
    (-124.26, 48.25),
    (-123.43, 48.12),
    (-123.10, 48.15),
    (-122.76, 48.12),
    (-122.68, 47.95),
    (-122.55, 47.60),
    (-122.60, 47.30),
    (-122.90, 47.10),
    (-122.45, 47.25),
    (-122.35, 47.60),
    (-122.30, 47.95),
    (-122.50, 48.30),
    (-122.60, 48.55),
    (-122.50, 48.75),
    (-122.75, 49.00),
    (-123.10, 49.05),
    (-123.25, 49.30),
    (-123.50, 49.50),
    (-123.95, 49.80),
    (-124.50, 50.50),
    (-128.00, 50.50),
    (-128.00, 44.50),
];

/// All embedded features in draw order.
pub const FEATURES: &[Feature] = &[
    Feature {
        name: "pacific",
        kind: FeatureKind::Ocean,
        points: PACIFIC,
    },
    Feature {
        name: "vancouver_island",
        kind: FeatureKind::Island,
        points: VANCOUVER_ISLAND,
    },
    Feature {
        name: "mainland_coast",
        kind: FeatureKind::Coastline,
        points: MAINLAND_COAST,
    },
    Feature {
        name: "vancouver_island_coast",
        kind: FeatureKind::Coastline,
        points: VANCOUVER_ISLAND,
    },
    Feature {
        name: "washington_oregon",
        kind: FeatureKind::Border,
        points: WA_OR_BORDER,
    },
    Feature {
        name: "washington_idaho",
        kind: FeatureKind::Border,
        points: WA_ID_BORDER,
    },
    Feature {
        name: "oregon_idaho",
        kind: FeatureKind::Border,
        points: OR_ID_BORDER,
    },
    Feature {
        name: "canada",
        kind: FeatureKind::Border,
        points: CANADA_BORDER,
    },
];

/// Features of the given kind that touch `bbox`.
pub fn features_in(bbox: &BoundingBox, kind: FeatureKind) -> impl Iterator<Item = &'static Feature> + '_ {
    FEATURES
        .iter()
        .filter(move |f| f.kind == kind && f.intersects(bbox))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygons_are_closed_or_closable() {
        for f in FEATURES {
            assert!(f.points.len() >= 2, "{} too short", f.name);
        }
        let island = VANCOUVER_ISLAND;
        assert_eq!(island.first(), island.last());
    }

    #[test]
    fn test_pacific_shares_mainland_coast() {
        assert!(PACIFIC.starts_with(MAINLAND_COAST));
    }

    #[test]
    fn test_washington_features_present() {
        let bbox = BoundingBox::WASHINGTON;
        assert_eq!(features_in(&bbox, FeatureKind::Ocean).count(), 1);
        assert_eq!(features_in(&bbox, FeatureKind::Border).count(), 4);
        assert!(features_in(&bbox, FeatureKind::Coastline).count() >= 1);
    }

    #[test]
    fn test_features_outside_extent_skipped() {
        let bbox = BoundingBox::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(features_in(&bbox, FeatureKind::Border).count(), 0);
    }
}
