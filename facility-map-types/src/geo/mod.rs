//! Points in geographic coordinates (latitude and longitude).

mod point;

pub use point::{GeoPoint, GeoPoint2d, NewGeoPoint, MAX_LAT, MAX_LNG};
