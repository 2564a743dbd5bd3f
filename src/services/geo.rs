//! Great-circle proximity filtering
//!
//! Distances use the haversine formula on a sphere of radius 6371 km.
//! Filtering is opt-in: a filter exists only when both centre coordinates
//! are supplied.

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

/// Slack allowed at the boundary so that a point exactly `max_km` away passes
pub const DISTANCE_TOLERANCE_KM: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both parts or nothing; `0.0` is a real coordinate
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self { lat, lng }),
            _ => None,
        }
    }
}

/// Haversine distance in kilometres
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

pub fn within_radius(center: Coordinates, candidate: Coordinates, max_km: f64) -> bool {
    haversine_km(center, candidate) <= max_km + DISTANCE_TOLERANCE_KM
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFilter {
    pub center: Coordinates,
    pub max_km: f64,
}

impl GeoFilter {
    /// Build a filter, or `None` when either centre coordinate is missing
    pub fn new(lat: Option<f64>, lng: Option<f64>, max_km: f64) -> Option<Self> {
        Coordinates::from_parts(lat, lng).map(|center| Self { center, max_km })
    }

    /// Candidates without coordinates never match an active filter
    pub fn matches(&self, candidate: Option<Coordinates>) -> bool {
        candidate.is_some_and(|point| within_radius(self.center, point, self.max_km))
    }

    /// Distance bound including the boundary tolerance, for store-side filtering
    pub fn threshold_km(&self) -> f64 {
        self.max_km + DISTANCE_TOLERANCE_KM
    }
}

/// Apply an optional filter; `None` lets every candidate through
pub fn passes(filter: Option<&GeoFilter>, candidate: Option<Coordinates>) -> bool {
    filter.map_or(true, |filter| filter.matches(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KAJAANI: Coordinates = Coordinates { lat: 64.2222, lng: 27.7278 };
    const OULU: Coordinates = Coordinates { lat: 65.0121, lng: 25.4651 };

    /// Point `km` due north of `origin`
    fn north_of(origin: Coordinates, km: f64) -> Coordinates {
        let delta_lat = (km / EARTH_RADIUS_KM).to_degrees();
        Coordinates::new(origin.lat + delta_lat, origin.lng)
    }

    #[test]
    fn test_known_distance() {
        let distance = haversine_km(KAJAANI, OULU);
        assert!((distance - 139.0).abs() < 5.0, "got {}", distance);
    }

    #[test]
    fn test_boundary_passes_and_just_beyond_fails() {
        let boundary = north_of(KAJAANI, 10.0);
        let distance = haversine_km(KAJAANI, boundary);
        assert!((distance - 10.0).abs() < 1e-6);

        let filter = GeoFilter::new(Some(KAJAANI.lat), Some(KAJAANI.lng), distance).unwrap();
        assert!(filter.matches(Some(boundary)));

        let beyond = north_of(KAJAANI, 10.001);
        let filter = GeoFilter::new(Some(KAJAANI.lat), Some(KAJAANI.lng), 10.0).unwrap();
        assert!(!filter.matches(Some(beyond)));
    }

    #[test]
    fn test_missing_center_disables_filtering() {
        assert!(GeoFilter::new(Some(64.2), None, 10.0).is_none());
        assert!(GeoFilter::new(None, Some(27.7), 10.0).is_none());
        assert!(passes(None, Some(OULU)));
        assert!(passes(None, None));
    }

    #[test]
    fn test_zero_is_a_coordinate() {
        let filter = GeoFilter::new(Some(0.0), Some(0.0), 1.0).unwrap();
        assert!(filter.matches(Some(Coordinates::new(0.0, 0.0))));
        assert!(!filter.matches(Some(KAJAANI)));
    }

    #[test]
    fn test_candidate_without_coordinates_fails_active_filter() {
        let filter = GeoFilter::new(Some(KAJAANI.lat), Some(KAJAANI.lng), 20_000.0).unwrap();
        assert!(!filter.matches(None));
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric_and_non_negative(
            lat1 in -90.0f64..90.0, lng1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0, lng2 in -180.0f64..180.0,
        ) {
            let a = Coordinates::new(lat1, lng1);
            let b = Coordinates::new(lat2, lng2);
            let ab = haversine_km(a, b);
            let ba = haversine_km(b, a);
            prop_assert!(ab >= 0.0);
            prop_assert!((ab - ba).abs() < 1e-6);
            prop_assert!(ab <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }

        #[test]
        fn prop_point_passes_at_its_own_distance(
            lat1 in -89.0f64..89.0, lng1 in -179.0f64..179.0,
            lat2 in -89.0f64..89.0, lng2 in -179.0f64..179.0,
        ) {
            let center = Coordinates::new(lat1, lng1);
            let candidate = Coordinates::new(lat2, lng2);
            let distance = haversine_km(center, candidate);
            prop_assert!(within_radius(center, candidate, distance));
            prop_assert!(within_radius(center, center, 0.0));
        }
    }
}
