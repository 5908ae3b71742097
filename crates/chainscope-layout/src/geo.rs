#![forbid(unsafe_code)]

//! Mercator projection fitted to a drawing extent.

use std::f64::consts::PI;

/// Latitudes beyond this are clamped; the Mercator y-ordinate diverges at
/// the poles.
const MAX_LATITUDE: f64 = 85.0;

/// A Mercator projection scaled and translated to a pixel extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    scale: f64,
    translate_x: f64,
    translate_y: f64,
}

impl MapProjection {
    /// Fit a projection to a `width` × `height` extent: the full longitude
    /// range spans 90% of the width, and the translation drops the equator
    /// below the vertical midpoint so the populated latitudes fill the
    /// frame.
    #[must_use]
    pub fn fitted(width: f64, height: f64) -> Self {
        Self {
            scale: width / (2.0 * PI) * 0.9,
            translate_x: width / 2.0,
            translate_y: height / 1.6,
        }
    }

    /// Project a longitude/latitude pair (degrees) to extent coordinates.
    #[must_use]
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let x = self.translate_x + self.scale * lon.to_radians();
        let y = self.translate_y - self.scale * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_translation() {
        let proj = MapProjection::fitted(160.0, 80.0);
        let (x, y) = proj.project(0.0, 0.0);
        assert!((x - 80.0).abs() < 1e-9);
        assert!((y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn east_is_right_and_north_is_up() {
        let proj = MapProjection::fitted(160.0, 80.0);
        let (x_east, _) = proj.project(90.0, 0.0);
        let (_, y_north) = proj.project(0.0, 45.0);
        let (cx, cy) = proj.project(0.0, 0.0);
        assert!(x_east > cx);
        assert!(y_north < cy);
    }

    #[test]
    fn full_longitude_range_fits_width() {
        let proj = MapProjection::fitted(160.0, 80.0);
        let (x_west, _) = proj.project(-180.0, 0.0);
        let (x_east, _) = proj.project(180.0, 0.0);
        assert!(x_west >= 0.0);
        assert!(x_east <= 160.0);
    }

    #[test]
    fn extreme_latitudes_are_clamped() {
        let proj = MapProjection::fitted(160.0, 80.0);
        let (_, y_pole) = proj.project(0.0, 90.0);
        let (_, y_clamped) = proj.project(0.0, 85.0);
        assert!((y_pole - y_clamped).abs() < 1e-9);
        assert!(y_pole.is_finite());
    }

    #[test]
    fn projection_is_symmetric_about_equator_translation() {
        let proj = MapProjection::fitted(100.0, 50.0);
        let (_, y_north) = proj.project(0.0, 30.0);
        let (_, y_south) = proj.project(0.0, -30.0);
        let (_, cy) = proj.project(0.0, 0.0);
        assert!(((cy - y_north) - (y_south - cy)).abs() < 1e-9);
    }
}
