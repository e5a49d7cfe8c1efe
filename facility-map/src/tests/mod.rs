//! Test fixtures: a map provider that records everything done to it.

use std::sync::Arc;

use async_trait::async_trait;
use facility_map_types::geo::GeoPoint2d;
use parking_lot::Mutex;

use crate::error::FacilityMapError;
use crate::facility::Facility;
use crate::provider::{ClickHandler, MapProvider, MarkerClickHandler};
use crate::symbol::IconSpec;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn facility(lat: f64, lng: f64, kind: &str, status: &str) -> Facility {
    Facility::new(lat, lng, kind, status).expect("test facility must be valid")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBehavior {
    AlreadyLoaded,
    Succeeds,
    ScriptFails,
    InitFails,
    NeverCompletes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayId(pub usize);

#[derive(Debug, Clone)]
pub struct SurfaceRecord {
    pub container_id: String,
    pub center: GeoPoint2d,
    pub zoom_level: u32,
}

#[derive(Debug, Clone)]
pub struct MarkerRecord {
    pub id: MarkerId,
    pub position: GeoPoint2d,
    pub icon_url: &'static str,
    pub surface: Option<SurfaceId>,
}

#[derive(Debug, Clone)]
pub struct OverlayRecord {
    pub position: GeoPoint2d,
    pub content: String,
    pub y_anchor: f64,
    pub surface: Option<SurfaceId>,
}

#[derive(Default)]
struct ProviderState {
    script_loads: usize,
    initializations: usize,
    initialized: bool,
    surfaces: Vec<SurfaceRecord>,
    markers: Vec<MarkerRecord>,
    overlays: Vec<OverlayRecord>,
    click_handlers: Vec<(MarkerId, Arc<dyn ClickHandler>)>,
}

pub struct TestProvider {
    behavior: Mutex<LoadBehavior>,
    containers: Vec<String>,
    state: Mutex<ProviderState>,
}

impl TestProvider {
    pub fn new(behavior: LoadBehavior) -> Self {
        init_logger();
        Self {
            behavior: Mutex::new(behavior),
            containers: vec!["map".to_string()],
            state: Mutex::default(),
        }
    }

    pub fn set_behavior(&self, behavior: LoadBehavior) {
        *self.behavior.lock() = behavior;
    }

    pub fn script_loads(&self) -> usize {
        self.state.lock().script_loads
    }

    pub fn initializations(&self) -> usize {
        self.state.lock().initializations
    }

    pub fn surfaces_created(&self) -> usize {
        self.state.lock().surfaces.len()
    }

    pub fn markers_created(&self) -> usize {
        self.state.lock().markers.len()
    }

    pub fn surface(&self, id: SurfaceId) -> SurfaceRecord {
        self.state.lock().surfaces[id.0].clone()
    }

    pub fn attached_markers(&self, surface: SurfaceId) -> Vec<MarkerRecord> {
        self.state
            .lock()
            .markers
            .iter()
            .filter(|marker| marker.surface == Some(surface))
            .cloned()
            .collect()
    }

    pub fn attached_overlays(&self, surface: SurfaceId) -> Vec<OverlayRecord> {
        self.state
            .lock()
            .overlays
            .iter()
            .filter(|overlay| overlay.surface == Some(surface))
            .cloned()
            .collect()
    }

    /// All markers that are attached to any surface.
    pub fn all_attached_markers(&self) -> Vec<MarkerRecord> {
        self.state
            .lock()
            .markers
            .iter()
            .filter(|marker| marker.surface.is_some())
            .cloned()
            .collect()
    }

    pub fn all_attached_overlays(&self) -> Vec<OverlayRecord> {
        self.state
            .lock()
            .overlays
            .iter()
            .filter(|overlay| overlay.surface.is_some())
            .cloned()
            .collect()
    }

    pub fn click_handler_count(&self) -> usize {
        self.state.lock().click_handlers.len()
    }

    /// Simulates a user click on the marker, calling every handler bound to it.
    pub fn click(&self, marker: MarkerId) {
        let handlers: Vec<_> = self
            .state
            .lock()
            .click_handlers
            .iter()
            .filter(|(id, _)| *id == marker)
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in handlers {
            handler();
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MapProvider for TestProvider {
    type Surface = SurfaceId;
    type Position = GeoPoint2d;
    type Icon = IconSpec;
    type Marker = MarkerId;
    type Overlay = OverlayId;

    fn is_loaded(&self) -> bool {
        *self.behavior.lock() == LoadBehavior::AlreadyLoaded || self.state.lock().initialized
    }

    async fn load_script(&self) -> Result<(), FacilityMapError> {
        self.state.lock().script_loads += 1;
        let behavior = *self.behavior.lock();
        match behavior {
            LoadBehavior::ScriptFails => Err(FacilityMapError::ProviderLoad(
                "script request failed".into(),
            )),
            LoadBehavior::NeverCompletes => futures::future::pending().await,
            _ => Ok(()),
        }
    }

    async fn initialize(&self) -> Result<(), FacilityMapError> {
        let behavior = *self.behavior.lock();
        let mut state = self.state.lock();
        state.initializations += 1;
        match behavior {
            LoadBehavior::InitFails => Err(FacilityMapError::ProviderInit(
                "sdk is not responding".into(),
            )),
            _ => {
                state.initialized = true;
                Ok(())
            }
        }
    }

    fn create_surface(
        &self,
        container_id: &str,
        center: &GeoPoint2d,
        zoom_level: u32,
    ) -> Result<SurfaceId, FacilityMapError> {
        if !self.containers.iter().any(|id| id == container_id) {
            return Err(FacilityMapError::Render(format!(
                "container '{container_id}' not found"
            )));
        }

        let mut state = self.state.lock();
        state.surfaces.push(SurfaceRecord {
            container_id: container_id.to_string(),
            center: *center,
            zoom_level,
        });

        Ok(SurfaceId(state.surfaces.len() - 1))
    }

    fn create_position(&self, point: &GeoPoint2d) -> GeoPoint2d {
        *point
    }

    fn create_icon(&self, spec: &IconSpec) -> IconSpec {
        spec.clone()
    }

    fn create_marker(&self, position: &GeoPoint2d, icon: &IconSpec) -> MarkerId {
        let mut state = self.state.lock();
        let id = MarkerId(state.markers.len());
        state.markers.push(MarkerRecord {
            id,
            position: *position,
            icon_url: icon.url,
            surface: None,
        });

        id
    }

    fn create_overlay(&self, position: &GeoPoint2d, content: &str, y_anchor: f64) -> OverlayId {
        let mut state = self.state.lock();
        state.overlays.push(OverlayRecord {
            position: *position,
            content: content.to_string(),
            y_anchor,
            surface: None,
        });

        OverlayId(state.overlays.len() - 1)
    }

    fn on_marker_click(&self, marker: &MarkerId, handler: MarkerClickHandler) {
        self.state
            .lock()
            .click_handlers
            .push((*marker, Arc::from(handler)));
    }

    fn attach_marker(&self, marker: &MarkerId, surface: &SurfaceId) {
        self.state.lock().markers[marker.0].surface = Some(*surface);
    }

    fn detach_marker(&self, marker: &MarkerId) {
        self.state.lock().markers[marker.0].surface = None;
    }

    fn attach_overlay(&self, overlay: &OverlayId, surface: &SurfaceId) {
        self.state.lock().overlays[overlay.0].surface = Some(*surface);
    }

    fn detach_overlay(&self, overlay: &OverlayId) {
        self.state.lock().overlays[overlay.0].surface = None;
    }
}
