use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::FacilityMapTypesError;

/// Maximum absolute latitude value in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Maximum absolute longitude value in degrees.
pub const MAX_LNG: f64 = 180.0;

/// Point on the surface of the Earth given in degrees.
pub trait GeoPoint {
    /// Numeric type used to represent coordinates.
    type Num: Float;

    /// Latitude in degrees.
    fn lat(&self) -> Self::Num;
    /// Longitude in degrees.
    fn lng(&self) -> Self::Num;
}

/// Geo point that can be constructed from its coordinates.
pub trait NewGeoPoint<N = f64>: GeoPoint<Num = N> + Sized {
    /// Creates a point from latitude and longitude.
    fn latlon(lat: N, lng: N) -> Self;
    /// Creates a point from longitude and latitude.
    fn lonlat(lng: N, lat: N) -> Self {
        Self::latlon(lat, lng)
    }
}

/// 2d point on the surface of the Earth.
///
/// The coordinates are not checked by [`NewGeoPoint::latlon`]. Use [`GeoPoint2d::try_latlon`] for
/// values that come from outside of the program.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lng: f64,
}

impl GeoPoint for GeoPoint2d {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lng(&self) -> f64 {
        self.lng
    }
}

impl NewGeoPoint<f64> for GeoPoint2d {
    fn latlon(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl GeoPoint2d {
    /// Creates a new point from another.
    pub fn from(other: &impl GeoPoint<Num = f64>) -> Self {
        Self {
            lat: other.lat(),
            lng: other.lng(),
        }
    }

    /// Creates a point, checking that both coordinates are finite and within the valid range.
    ///
    /// ```
    /// use facility_map_types::geo::{GeoPoint, GeoPoint2d};
    ///
    /// let point = GeoPoint2d::try_latlon(37.5, 127.0).unwrap();
    /// assert_eq!(point.lng(), 127.0);
    ///
    /// assert!(GeoPoint2d::try_latlon(91.0, 0.0).is_err());
    /// assert!(GeoPoint2d::try_latlon(0.0, f64::NAN).is_err());
    /// ```
    pub fn try_latlon(lat: f64, lng: f64) -> Result<Self, FacilityMapTypesError> {
        Ok(Self {
            lat: check_axis("lat", lat, MAX_LAT)?,
            lng: check_axis("lng", lng, MAX_LNG)?,
        })
    }
}

fn check_axis(axis: &'static str, value: f64, limit: f64) -> Result<f64, FacilityMapTypesError> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(value)
    } else {
        Err(FacilityMapTypesError::InvalidCoordinate {
            axis,
            value,
            min: -limit,
            max: limit,
        })
    }
}

/// Creates a new GeoPoint2d from latitude and longitude values (in degrees).
///
/// ```
/// use facility_map_types::geo::GeoPoint;
/// use facility_map_types::latlon;
///
/// let point = latlon!(37.613, 127.005);
/// assert_eq!(point.lat(), 37.613);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lng:expr) => {
        <::facility_map_types::geo::GeoPoint2d as ::facility_map_types::geo::NewGeoPoint<f64>>::latlon(
            $lat, $lng,
        )
    };
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn latlon_macro_keeps_axis_order() {
        let point = crate::latlon!(37.5, 127.0);
        assert_relative_eq!(point.lat(), 37.5);
        assert_relative_eq!(point.lng(), 127.0);

        let point = GeoPoint2d::lonlat(127.0, 37.5);
        assert_eq!(point, crate::latlon!(37.5, 127.0));
    }

    #[test]
    fn try_latlon_accepts_boundaries() {
        assert!(GeoPoint2d::try_latlon(90.0, 180.0).is_ok());
        assert!(GeoPoint2d::try_latlon(-90.0, -180.0).is_ok());
    }

    #[test]
    fn try_latlon_rejects_out_of_range() {
        assert_matches!(
            GeoPoint2d::try_latlon(-90.5, 0.0),
            Err(FacilityMapTypesError::InvalidCoordinate { axis: "lat", .. })
        );
        assert_matches!(
            GeoPoint2d::try_latlon(0.0, 180.1),
            Err(FacilityMapTypesError::InvalidCoordinate { axis: "lng", .. })
        );
    }

    #[test]
    fn try_latlon_rejects_non_finite() {
        assert!(GeoPoint2d::try_latlon(f64::INFINITY, 0.0).is_err());
        assert!(GeoPoint2d::try_latlon(0.0, f64::NEG_INFINITY).is_err());
        assert!(GeoPoint2d::try_latlon(f64::NAN, f64::NAN).is_err());
    }

    #[test]
    fn serializes_with_short_axis_names() {
        let json = serde_json::to_string(&crate::latlon!(37.613, 127.005)).unwrap();
        assert_eq!(json, r#"{"lat":37.613,"lng":127.005}"#);
    }
}
