//! Coordinate mapping between geographic space and the projected plane.
//!
//! The heat-map core operates purely on projected-plane coordinates. This
//! crate is the narrow seam a host mapping layer plugs into: a [`Projection`]
//! turns geographic coordinates into plane positions once, at model
//! construction, and the plane/screen helpers convert between plane
//! positions and viewport-relative screen pixels at draw time. Everything
//! here is pure math with no dependency on any particular map widget.

pub mod mercator;

pub use mercator::WebMercator;

use heatmap_common::BoundingBox;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A position in the projected plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanePoint {
    pub x: f64,
    pub y: f64,
}

impl PlanePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mapping between geographic coordinates and a 2-D projected plane.
///
/// Implementations must be pure functions of their input; the rendering
/// pipeline assumes projecting the same coordinate twice yields the same
/// plane position.
pub trait Projection {
    /// Project a geographic coordinate onto the plane.
    fn project(&self, coord: GeoCoord) -> PlanePoint;

    /// Inverse mapping, plane to geographic.
    fn unproject(&self, point: PlanePoint) -> GeoCoord;

    /// Extent of the whole world in plane coordinates.
    fn world_bounds(&self) -> BoundingBox;
}

/// Map a plane position to screen pixels relative to a viewport origin.
///
/// `zoom_scale` is screen pixels per plane unit.
pub fn plane_to_screen(point: PlanePoint, viewport: &BoundingBox, zoom_scale: f64) -> (f64, f64) {
    (
        (point.x - viewport.min_x) * zoom_scale,
        (point.y - viewport.min_y) * zoom_scale,
    )
}

/// Map viewport-relative screen pixels back to a plane position.
pub fn screen_to_plane(sx: f64, sy: f64, viewport: &BoundingBox, zoom_scale: f64) -> PlanePoint {
    PlanePoint {
        x: viewport.min_x + sx / zoom_scale,
        y: viewport.min_y + sy / zoom_scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_screen_round_trip() {
        let viewport = BoundingBox::new(100.0, 200.0, 356.0, 456.0);
        let zoom_scale = 0.25;

        let p = PlanePoint::new(180.0, 300.0);
        let (sx, sy) = plane_to_screen(p, &viewport, zoom_scale);
        assert_eq!((sx, sy), (20.0, 25.0));

        let back = screen_to_plane(sx, sy, &viewport, zoom_scale);
        assert_eq!(back, p);
    }

    #[test]
    fn test_viewport_origin_maps_to_screen_origin() {
        let viewport = BoundingBox::new(-50.0, -50.0, 50.0, 50.0);
        let origin = PlanePoint::new(-50.0, -50.0);
        assert_eq!(plane_to_screen(origin, &viewport, 1.0), (0.0, 0.0));
    }
}
