//! Capability interface to the map SDK that draws the map, and the machinery to load it.

use async_trait::async_trait;
use facility_map_types::geo::GeoPoint2d;
use maybe_sync::{MaybeSend, MaybeSync};

use crate::error::FacilityMapError;
use crate::symbol::IconSpec;

mod bootstrap;
mod lifetime;

pub use bootstrap::{BootstrapState, LoadFailure, ProviderBootstrap};
pub use lifetime::MountLifetime;

/// Handler called by the provider when the user clicks a marker.
pub trait ClickHandler: Fn() + MaybeSend + MaybeSync {}

impl<T: Fn() + MaybeSend + MaybeSync> ClickHandler for T {}

/// Boxed [`ClickHandler`] given to [`MapProvider::on_marker_click`].
pub type MarkerClickHandler = Box<dyn ClickHandler>;

/// Map SDK that renders the map surface and the objects on it.
///
/// The provider is not owned by the map component. It is given to a [`ProviderBootstrap`], which
/// makes sure the SDK is loaded once, and then used by the renderer to create a surface and place
/// markers and overlays on it. All objects created by the provider are opaque to the rest of the
/// crate.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MapProvider: MaybeSend + MaybeSync + 'static {
    /// Map surface.
    type Surface;
    /// Coordinates in the provider representation.
    type Position;
    /// Marker image.
    type Icon;
    /// Point marker.
    type Marker;
    /// Custom html overlay.
    type Overlay;

    /// Returns true if the SDK is already loaded and initialized, e.g. by another part of the
    /// page. In this case neither [`MapProvider::load_script`] nor [`MapProvider::initialize`] is
    /// called.
    fn is_loaded(&self) -> bool;

    /// Fetches and executes the SDK script.
    async fn load_script(&self) -> Result<(), FacilityMapError>;

    /// Runs the SDK own initialization hook. Completes when the SDK reports it is ready.
    async fn initialize(&self) -> Result<(), FacilityMapError>;

    /// Creates a map surface in the container element with the given id.
    fn create_surface(
        &self,
        container_id: &str,
        center: &Self::Position,
        zoom_level: u32,
    ) -> Result<Self::Surface, FacilityMapError>;

    /// Converts a geographic point into the provider coordinates.
    fn create_position(&self, point: &GeoPoint2d) -> Self::Position;

    /// Creates a marker image.
    fn create_icon(&self, spec: &IconSpec) -> Self::Icon;

    /// Creates a marker at the given position. The marker is not shown until it is attached to a
    /// surface.
    fn create_marker(&self, position: &Self::Position, icon: &Self::Icon) -> Self::Marker;

    /// Creates an html overlay at the given position. `y_anchor` is the vertical anchor as a
    /// fraction of the overlay height.
    fn create_overlay(
        &self,
        position: &Self::Position,
        content: &str,
        y_anchor: f64,
    ) -> Self::Overlay;

    /// Binds the click handler to the marker.
    fn on_marker_click(&self, marker: &Self::Marker, handler: MarkerClickHandler);

    /// Shows the marker on the surface.
    fn attach_marker(&self, marker: &Self::Marker, surface: &Self::Surface);

    /// Removes the marker from the surface it is attached to.
    fn detach_marker(&self, marker: &Self::Marker);

    /// Shows the overlay on the surface.
    fn attach_overlay(&self, overlay: &Self::Overlay, surface: &Self::Surface);

    /// Removes the overlay from the surface it is attached to.
    fn detach_overlay(&self, overlay: &Self::Overlay);
}
