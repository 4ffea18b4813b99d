//! Spherical Web-Mercator projection.
//!
//! Maps lat/lon onto a square plane with a top-left origin: x grows east,
//! y grows south. The plane spans `world_size` units per side, so the whole
//! world at the innermost zoom corresponds to a 256x256 tile doubled twenty
//! times (256 * 2^20 plane units per side by default).

use crate::{GeoCoord, PlanePoint, Projection};
use heatmap_common::BoundingBox;
use std::f64::consts::PI;

/// Latitude bound beyond which the Mercator projection diverges.
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Spherical Web-Mercator projection onto a `world_size`-unit square plane.
#[derive(Debug, Clone, Copy)]
pub struct WebMercator {
    world_size: f64,
}

impl WebMercator {
    /// Plane units per world side at the innermost zoom level
    /// (256 pixels * 2^20 zoom doublings).
    pub const DEFAULT_WORLD_SIZE: f64 = 268_435_456.0;

    /// Create a projection with a custom world side length.
    pub fn with_world_size(world_size: f64) -> Self {
        Self { world_size }
    }

    /// Side length of the projected world in plane units.
    pub fn world_size(&self) -> f64 {
        self.world_size
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self {
            world_size: Self::DEFAULT_WORLD_SIZE,
        }
    }
}

impl Projection for WebMercator {
    fn project(&self, coord: GeoCoord) -> PlanePoint {
        let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let lon = coord.lon.clamp(-180.0, 180.0);

        let x = (lon + 180.0) / 360.0 * self.world_size;
        let lat_rad = lat.to_radians();
        let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * self.world_size;

        PlanePoint { x, y }
    }

    fn unproject(&self, point: PlanePoint) -> GeoCoord {
        let lon = point.x / self.world_size * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * point.y / self.world_size))
            .sinh()
            .atan()
            .to_degrees();

        GeoCoord { lat, lon }
    }

    fn world_bounds(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.world_size, self.world_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_island_maps_to_plane_center() {
        let proj = WebMercator::default();
        let p = proj.project(GeoCoord::new(0.0, 0.0));
        let half = proj.world_size() / 2.0;
        assert!((p.x - half).abs() < 1e-6);
        assert!((p.y - half).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip() {
        let proj = WebMercator::default();
        let coords = [
            GeoCoord::new(40.7128, -74.0060), // NYC
            GeoCoord::new(-33.8688, 151.2093), // Sydney
            GeoCoord::new(64.1466, -21.9426), // Reykjavik
        ];

        for coord in coords {
            let back = proj.unproject(proj.project(coord));
            assert!((back.lat - coord.lat).abs() < 1e-9, "lat for {:?}", coord);
            assert!((back.lon - coord.lon).abs() < 1e-9, "lon for {:?}", coord);
        }
    }

    #[test]
    fn test_north_is_up() {
        // y grows southward: a more northern latitude has a smaller y.
        let proj = WebMercator::default();
        let north = proj.project(GeoCoord::new(60.0, 10.0));
        let south = proj.project(GeoCoord::new(-60.0, 10.0));
        assert!(north.y < south.y);
    }

    #[test]
    fn test_projection_stays_in_world_bounds() {
        let proj = WebMercator::default();
        let bounds = proj.world_bounds();
        for &(lat, lon) in &[(89.9, 179.9), (-89.9, -179.9), (85.0, 0.0), (0.0, -180.0)] {
            let p = proj.project(GeoCoord::new(lat, lon));
            assert!(bounds.contains_point(p.x, p.y), "({lat}, {lon}) -> {:?}", p);
        }
    }

    #[test]
    fn test_custom_world_size() {
        let proj = WebMercator::with_world_size(256.0);
        let p = proj.project(GeoCoord::new(0.0, 180.0));
        assert!((p.x - 256.0).abs() < 1e-9);
    }
}
