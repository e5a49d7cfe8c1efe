use std::sync::Arc;

use crate::config::MapConfig;
use crate::error::FacilityMapError;
use crate::facility::FacilityList;
use crate::legend::Legend;
use crate::provider::{BootstrapState, MapProvider, MountLifetime, ProviderBootstrap};
use crate::renderer::{MapRenderer, RenderPass};
use crate::selection::{SelectionCallback, SelectionNotifier};

/// State of a [`FacilityMap`] as seen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapStatus {
    /// The provider is not ready yet.
    Loading,
    /// The provider failed to load. Contains the error message.
    Failed(String),
    /// The map is rendered.
    Ready,
}

/// What the host page should display for the map.
#[derive(Debug, Clone, PartialEq)]
pub enum MapOutput {
    /// Placeholder shown while the provider is loading.
    Loading {
        /// Text of the placeholder.
        message: String,
    },
    /// The provider failed to load.
    Failed {
        /// Error description.
        message: String,
    },
    /// Full-size map container with the legend over it.
    Map {
        /// Id of the element the map is rendered into.
        container_id: String,
        /// Number of markers on the map.
        marker_count: usize,
        /// Number of status overlays on the map.
        overlay_count: usize,
        /// Legend panel.
        legend: Legend,
    },
}

/// Map component that shows a list of facilities.
///
/// The component reconciles the map every time one of its inputs changes: the provider becomes
/// ready, a different facility list is set or a different selection callback is set. Every
/// reconciliation removes all markers and overlays of the previous render before creating new
/// ones.
pub struct FacilityMap<P: MapProvider> {
    bootstrap: Arc<ProviderBootstrap<P>>,
    config: MapConfig,
    renderer: MapRenderer,
    facilities: FacilityList,
    notifier: SelectionNotifier,
    ready: bool,
    pass: Option<RenderPass<P>>,
}

impl<P: MapProvider> FacilityMap<P> {
    /// Creates a new component. Nothing is loaded or rendered until [`FacilityMap::mount`] is
    /// called.
    pub fn new(bootstrap: Arc<ProviderBootstrap<P>>, config: MapConfig) -> Self {
        Self {
            bootstrap,
            renderer: MapRenderer::from_config(&config),
            config,
            facilities: Arc::new([]),
            notifier: SelectionNotifier::default(),
            ready: false,
            pass: None,
        }
    }

    /// Loads the provider and renders the map.
    ///
    /// The load is bound to the given `lifetime`: if the lifetime ends before the provider is
    /// ready, this method returns [`FacilityMapError::Unmounted`] and the map is not touched.
    pub async fn mount(&mut self, lifetime: &MountLifetime) -> Result<(), FacilityMapError> {
        let bootstrap = self.bootstrap.clone();
        self.complete_load(lifetime.guard(bootstrap.load()).await)
    }

    /// Loads the provider again after a failure and renders the map.
    pub async fn retry(&mut self, lifetime: &MountLifetime) -> Result<(), FacilityMapError> {
        let bootstrap = self.bootstrap.clone();
        self.complete_load(lifetime.guard(bootstrap.retry()).await)
    }

    /// Ends the lifetime of the component and removes the map content.
    pub fn unmount(&mut self, lifetime: &MountLifetime) {
        lifetime.end();
        self.ready = false;
        self.clear();
        log::info!("Facility map unmounted");
    }

    /// Sets the facilities to show. The map is re-rendered if the list is not the same instance as
    /// the current one.
    pub fn set_facilities(&mut self, facilities: FacilityList) -> Result<(), FacilityMapError> {
        if Arc::ptr_eq(&self.facilities, &facilities) {
            return Ok(());
        }

        self.facilities = facilities;
        self.reconcile()
    }

    /// Sets the function called when a marker is clicked. The map is re-rendered if the callback
    /// is not the same instance as the current one.
    pub fn set_on_marker_click(
        &mut self,
        callback: Option<SelectionCallback>,
    ) -> Result<(), FacilityMapError> {
        if self.notifier.same_callback(callback.as_ref()) {
            return Ok(());
        }

        self.notifier = SelectionNotifier::new(callback);
        self.reconcile()
    }

    /// Current facility list.
    pub fn facilities(&self) -> &FacilityList {
        &self.facilities
    }

    /// Configuration of the component.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The provider.
    pub fn provider(&self) -> &Arc<P> {
        self.bootstrap.provider()
    }

    /// Current render, if the map is rendered.
    pub fn render_pass(&self) -> Option<&RenderPass<P>> {
        self.pass.as_ref()
    }

    /// Current state of the component.
    pub fn status(&self) -> MapStatus {
        if self.ready {
            return MapStatus::Ready;
        }

        match self.bootstrap.state() {
            BootstrapState::Failed(failure) => MapStatus::Failed(failure.to_string()),
            _ => MapStatus::Loading,
        }
    }

    /// Describes what should be displayed for the component.
    pub fn view(&self) -> MapOutput {
        match self.status() {
            MapStatus::Loading => MapOutput::Loading {
                message: self.config.loading_message.clone(),
            },
            MapStatus::Failed(message) => MapOutput::Failed { message },
            MapStatus::Ready => MapOutput::Map {
                container_id: self.config.container_id.clone(),
                marker_count: self.pass.as_ref().map_or(0, RenderPass::marker_count),
                overlay_count: self.pass.as_ref().map_or(0, RenderPass::overlay_count),
                legend: Legend::new(self.config.legend_locale),
            },
        }
    }

    fn complete_load(
        &mut self,
        result: Result<Result<(), FacilityMapError>, FacilityMapError>,
    ) -> Result<(), FacilityMapError> {
        match result {
            Ok(Ok(())) => {
                self.ready = true;
                self.reconcile()
            }
            Ok(Err(err)) => {
                log::warn!("Facility map cannot be rendered: {err}");
                Err(err)
            }
            Err(err) => {
                log::debug!("Provider load finished after the map was unmounted");
                Err(err)
            }
        }
    }

    fn clear(&mut self) {
        if let Some(pass) = self.pass.take() {
            pass.teardown(self.bootstrap.provider());
        }
    }

    fn reconcile(&mut self) -> Result<(), FacilityMapError> {
        self.clear();
        if !self.ready {
            return Ok(());
        }

        let pass = self.renderer.render(
            self.bootstrap.provider().as_ref(),
            &self.facilities,
            &self.notifier,
        )?;
        self.pass = Some(pass);

        Ok(())
    }
}

impl<P: MapProvider> Drop for FacilityMap<P> {
    fn drop(&mut self) {
        self.clear();
    }
}
