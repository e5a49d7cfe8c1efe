//! Primitive types shared by the facility map crates.
//!
//! * [`geo`] contains points on the surface of the Earth given in degrees of latitude and
//!   longitude, together with the `latlon!` macro and coordinate validation.
//! * [`cartesian`] contains screen-space primitives used to describe marker images: pixel
//!   [`Size`](cartesian::Size) and anchor [`Point2d`](cartesian::Point2d).

extern crate self as facility_map_types;

pub mod cartesian;
pub mod error;
pub mod geo;
