use std::fmt;

use facility_map_types::geo::GeoPoint2d;

use crate::config::MapConfig;
use crate::error::FacilityMapError;
use crate::facility::Facility;
use crate::provider::MapProvider;
use crate::selection::SelectionNotifier;
use crate::symbol::{MarkerIcon, StatusOverlay};

/// Map surface with the markers and overlays created by one render.
///
/// The objects stay on the map until [`RenderPass::teardown`] is called.
pub struct RenderPass<P: MapProvider> {
    surface: P::Surface,
    markers: Vec<P::Marker>,
    overlays: Vec<P::Overlay>,
}

impl<P: MapProvider> RenderPass<P> {
    /// The map surface.
    pub fn surface(&self) -> &P::Surface {
        &self.surface
    }

    /// Number of markers on the surface.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Number of status overlays on the surface.
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Removes all markers and overlays of the pass from the map.
    pub fn teardown(self, provider: &P) {
        log::debug!(
            "Removing {} markers and {} overlays",
            self.markers.len(),
            self.overlays.len()
        );

        for overlay in &self.overlays {
            provider.detach_overlay(overlay);
        }
        for marker in &self.markers {
            provider.detach_marker(marker);
        }
    }
}

impl<P: MapProvider> fmt::Debug for RenderPass<P>
where
    P::Surface: fmt::Debug,
    P::Marker: fmt::Debug,
    P::Overlay: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPass")
            .field("surface", &self.surface)
            .field("markers", &self.markers)
            .field("overlays", &self.overlays)
            .finish()
    }
}

/// Places facility markers on a new map surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRenderer {
    container_id: String,
    center: GeoPoint2d,
    zoom_level: u32,
}

impl MapRenderer {
    /// Creates a renderer drawing into the given container.
    pub fn new(container_id: impl Into<String>, center: GeoPoint2d, zoom_level: u32) -> Self {
        Self {
            container_id: container_id.into(),
            center,
            zoom_level,
        }
    }

    /// Creates a renderer with the container and initial view from the configuration.
    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(config.container_id.clone(), config.center, config.zoom_level)
    }

    /// Id of the container element.
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Creates a map surface with one marker for every facility, in the order of the list.
    ///
    /// Facilities that are not operating also get a status overlay at the marker position. Clicks
    /// on markers are reported through the `notifier`; overlays do not react to clicks.
    pub fn render<P: MapProvider>(
        &self,
        provider: &P,
        facilities: &[Facility],
        notifier: &SelectionNotifier,
    ) -> Result<RenderPass<P>, FacilityMapError> {
        let center = provider.create_position(&self.center);
        let surface = provider.create_surface(&self.container_id, &center, self.zoom_level)?;

        let hospital_icon = provider.create_icon(&MarkerIcon::Hospital.spec());
        let shelter_icon = provider.create_icon(&MarkerIcon::Shelter.spec());

        let mut markers = Vec::with_capacity(facilities.len());
        let mut overlays = Vec::new();

        for facility in facilities {
            let position = provider.create_position(&facility.position());
            let icon = match MarkerIcon::for_kind(facility.kind()) {
                MarkerIcon::Hospital => &hospital_icon,
                MarkerIcon::Shelter => &shelter_icon,
            };

            let marker = provider.create_marker(&position, icon);
            provider.attach_marker(&marker, &surface);
            provider.on_marker_click(&marker, notifier.handler_for(facility));
            markers.push(marker);

            if StatusOverlay::is_shown_for(facility.status()) {
                let overlay = provider.create_overlay(
                    &position,
                    StatusOverlay::CONTENT,
                    StatusOverlay::Y_ANCHOR,
                );
                provider.attach_overlay(&overlay, &surface);
                overlays.push(overlay);
            }
        }

        log::info!(
            "Rendered {} markers and {} status overlays",
            markers.len(),
            overlays.len()
        );

        Ok(RenderPass {
            surface,
            markers,
            overlays,
        })
    }
}
