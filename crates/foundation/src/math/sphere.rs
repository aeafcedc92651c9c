//! Geographic coordinates on a display sphere.
//!
//! Convention: latitude +90° maps to the +Y pole. Longitude is offset by
//! 180° and mirrored on X, which puts the prime meridian on +X and 90°E on
//! -Z before any globe spin is applied:
//!
//! ```text
//! colat = (90 - lat_deg).to_radians()
//! az    = (lng_deg + 180).to_radians()
//! x = -r * sin(colat) * cos(az)
//! y =  r * cos(colat)
//! z =  r * sin(colat) * sin(az)
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Vec3;

pub const LAT_MIN_DEG: f64 = -90.0;
pub const LAT_MAX_DEG: f64 = 90.0;
pub const LNG_MIN_DEG: f64 = -180.0;
pub const LNG_MAX_DEG: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoCoord", into = "RawGeoCoord")]
pub struct GeoCoord {
    lat_deg: f64,
    lng_deg: f64,
}

#[derive(Serialize, Deserialize)]
struct RawGeoCoord {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawGeoCoord> for GeoCoord {
    type Error = CoordinateError;

    fn try_from(raw: RawGeoCoord) -> Result<Self, Self::Error> {
        GeoCoord::new(raw.lat, raw.lng)
    }
}

impl From<GeoCoord> for RawGeoCoord {
    fn from(c: GeoCoord) -> Self {
        RawGeoCoord {
            lat: c.lat_deg,
            lng: c.lng_deg,
        }
    }
}

impl GeoCoord {
    /// Rejects non-finite and out-of-range input.
    pub fn new(lat_deg: f64, lng_deg: f64) -> Result<Self, CoordinateError> {
        if !lat_deg.is_finite() || !(LAT_MIN_DEG..=LAT_MAX_DEG).contains(&lat_deg) {
            return Err(CoordinateError::Latitude(lat_deg));
        }
        if !lng_deg.is_finite() || !(LNG_MIN_DEG..=LNG_MAX_DEG).contains(&lng_deg) {
            return Err(CoordinateError::Longitude(lng_deg));
        }
        Ok(Self { lat_deg, lng_deg })
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat_deg
    }

    pub fn lng_deg(&self) -> f64 {
        self.lng_deg
    }

    pub fn to_sphere(self, radius: f64) -> Vec3 {
        lat_lng_to_sphere(self.lat_deg, self.lng_deg, radius)
    }
}

/// Projects degrees onto a sphere of `radius` centered at the origin.
///
/// Input is not validated; see [`GeoCoord::new`].
pub fn lat_lng_to_sphere(lat_deg: f64, lng_deg: f64, radius: f64) -> Vec3 {
    let colat = (90.0 - lat_deg).to_radians();
    let az = (lng_deg + 180.0).to_radians();
    let (sin_colat, cos_colat) = colat.sin_cos();
    let (sin_az, cos_az) = az.sin_cos();

    Vec3::new(
        -radius * sin_colat * cos_az,
        radius * cos_colat,
        radius * sin_colat * sin_az,
    )
}

#[cfg(test)]
mod tests {
    use super::{CoordinateError, GeoCoord, lat_lng_to_sphere};
    use approx::assert_relative_eq;

    #[test]
    fn projected_points_lie_on_sphere() {
        let radius = 2.05;
        for lat in (-90..=90).step_by(15) {
            for lng in (-180..=180).step_by(20) {
                let p = lat_lng_to_sphere(lat as f64, lng as f64, radius);
                assert_relative_eq!(p.length(), radius, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn projection_is_deterministic() {
        let a = lat_lng_to_sphere(51.1657, 10.4515, 2.05);
        let b = lat_lng_to_sphere(51.1657, 10.4515, 2.05);
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.z.to_bits(), b.z.to_bits());
    }

    #[test]
    fn north_pole_ignores_longitude() {
        let reference = lat_lng_to_sphere(90.0, 0.0, 3.0);
        for lng in [-180.0, -97.5, 0.0, 45.0, 180.0] {
            let p = lat_lng_to_sphere(90.0, lng, 3.0);
            assert_relative_eq!(p.x, reference.x, epsilon = 1e-12);
            assert_relative_eq!(p.y, 3.0, epsilon = 1e-12);
            assert_relative_eq!(p.z, reference.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn india_matches_closed_form() {
        let (lat, lng, r) = (20.5937_f64, 78.9629_f64, 2.05_f64);
        let colat = (90.0 - lat).to_radians();
        let az = (lng + 180.0).to_radians();

        let p = lat_lng_to_sphere(lat, lng, r);
        assert_relative_eq!(p.x, -r * colat.sin() * az.cos(), epsilon = 1e-12);
        assert_relative_eq!(p.y, r * colat.cos(), epsilon = 1e-12);
        assert_relative_eq!(p.z, r * colat.sin() * az.sin(), epsilon = 1e-12);
    }

    #[test]
    fn equator_prime_meridian_lands_on_positive_x() {
        let p = lat_lng_to_sphere(0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn geo_coord_rejects_out_of_range() {
        assert_eq!(GeoCoord::new(90.5, 0.0), Err(CoordinateError::Latitude(90.5)));
        assert_eq!(
            GeoCoord::new(0.0, -180.25),
            Err(CoordinateError::Longitude(-180.25))
        );
        assert!(matches!(
            GeoCoord::new(f64::NAN, 0.0),
            Err(CoordinateError::Latitude(_))
        ));
        assert!(GeoCoord::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn geo_coord_deserializes_with_validation() {
        let ok: GeoCoord = serde_json::from_str(r#"{"lat": 10.0, "lng": 20.0}"#).expect("valid");
        assert_eq!(ok.lat_deg(), 10.0);
        assert_eq!(ok.lng_deg(), 20.0);

        let err = serde_json::from_str::<GeoCoord>(r#"{"lat": 100.0, "lng": 20.0}"#)
            .expect_err("latitude out of range");
        assert!(err.to_string().contains("latitude 100"));
    }

    #[test]
    fn ninety_east_lands_on_negative_z() {
        let p = lat_lng_to_sphere(0.0, 90.0, 1.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-12);
    }
}
