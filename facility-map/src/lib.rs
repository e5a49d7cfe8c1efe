//! Facility map renders hospitals, shelters and other facilities as markers on a web map.
//!
//! The marker icon of a facility shows its [kind](FacilityKind) and an additional status overlay
//! (a red cross glyph) is shown over every facility that is not [operating](FacilityStatus). When
//! the user clicks a marker, the application gets the full [`Facility`] record through a
//! [`SelectionCallback`].
//!
//! # Main components
//!
//! * [`MapProvider`](provider::MapProvider) is the capability interface to the map SDK that
//!   actually draws the map: surfaces, markers, overlays and coordinates. On `wasm32` targets the
//!   crate provides the [`KakaoProvider`](platform::web::KakaoProvider) implementation.
//! * [`ProviderBootstrap`](provider::ProviderBootstrap) loads the provider exactly once and
//!   reports its readiness.
//! * [`MapRenderer`] builds a [`RenderPass`] with one marker per facility.
//! * [`SelectionNotifier`] turns marker clicks into callback invocations.
//! * [`FacilityMap`] ties them together and reconciles the map every time its inputs change.
//!
//! ```ignore
//! use std::sync::Arc;
//! use facility_map::provider::{MountLifetime, ProviderBootstrap};
//! use facility_map::{parse_facilities, FacilityMap, MapConfig};
//!
//! let bootstrap = Arc::new(ProviderBootstrap::new(Arc::new(provider)));
//! let mut map = FacilityMap::new(bootstrap, MapConfig::default());
//! let lifetime = MountLifetime::new();
//!
//! map.mount(&lifetime).await?;
//! map.set_on_marker_click(Some(Arc::new(|facility| log::info!("{facility:?}"))))?;
//! map.set_facilities(parse_facilities(r#"[{"lat":37.5,"lng":127.0,"type":"hospital","status":"operating"}]"#)?)?;
//! ```

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod component;
mod config;
pub mod error;
mod facility;
pub mod legend;
pub mod platform;
pub mod provider;
mod renderer;
mod selection;
pub mod symbol;

#[cfg(test)]
pub(crate) mod tests;

pub use component::{FacilityMap, MapOutput, MapStatus};
pub use config::MapConfig;
pub use error::FacilityMapError;
pub use facility::{
    parse_facilities, Facility, FacilityKind, FacilityList, FacilityRecord, FacilityStatus,
};
pub use renderer::{MapRenderer, RenderPass};
pub use selection::{SelectionCallback, SelectionHandler, SelectionNotifier};

// Reexport facility_map_types
pub use facility_map_types;
