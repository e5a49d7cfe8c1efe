//! Platform specific stuff for WASM32 (web) targets.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use facility_map_types::geo::{GeoPoint, GeoPoint2d};
use futures::channel::oneshot;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlScriptElement};

use crate::component::MapOutput;
use crate::config::MapConfig;
use crate::error::FacilityMapError;
use crate::provider::{MapProvider, MarkerClickHandler};
use crate::symbol::IconSpec;

pub mod kakao;

use kakao::{CustomOverlay, KakaoMap, KakaoPoint, KakaoSize, LatLng, Marker, MarkerImage};

const SCRIPT_ELEMENT_ID: &str = "kakao-maps-sdk";

/// Map provider backed by the Kakao Maps JavaScript SDK.
pub struct KakaoProvider {
    sdk_url: String,
}

impl KakaoProvider {
    /// Creates a provider that loads the SDK from the given url. The url should include
    /// `autoload=false`, as the provider initializes the SDK itself.
    pub fn new(sdk_url: impl Into<String>) -> Self {
        Self {
            sdk_url: sdk_url.into(),
        }
    }

    /// Creates a provider with the SDK url from the configuration.
    pub fn from_config(config: &MapConfig) -> Result<Self, FacilityMapError> {
        Ok(Self::new(config.sdk_url()?))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl MapProvider for KakaoProvider {
    type Surface = KakaoMap;
    type Position = LatLng;
    type Icon = MarkerImage;
    type Marker = Marker;
    type Overlay = CustomOverlay;

    fn is_loaded(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };

        ["kakao", "maps", "LatLng"]
            .iter()
            .try_fold(JsValue::from(window), |object, key| {
                let value = js_sys::Reflect::get(&object, &JsValue::from_str(key)).ok()?;
                (!value.is_undefined() && !value.is_null()).then_some(value)
            })
            .is_some()
    }

    async fn load_script(&self) -> Result<(), FacilityMapError> {
        let document = document()?;
        if let Some(stale) = document.get_element_by_id(SCRIPT_ELEMENT_ID) {
            log::debug!("Removing unfinished sdk script element");
            stale.remove();
        }

        let script: HtmlScriptElement = document.create_element("script")?.dyn_into()?;
        script.set_id(SCRIPT_ELEMENT_ID);
        script.set_src(&self.sdk_url);
        script.set_async(true);

        let (sender, receiver) = oneshot::channel::<bool>();
        let sender = Rc::new(RefCell::new(Some(sender)));

        let on_load = script_event_closure(sender.clone(), true);
        script.set_onload(Some(on_load.as_ref().unchecked_ref()));
        on_load.forget();

        let on_error = script_event_closure(sender, false);
        script.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();

        document
            .head()
            .ok_or_else(|| FacilityMapError::Wasm(Some("document has no head".into())))?
            .append_child(&script)?;

        log::info!("Requested map sdk script from {}", self.sdk_url);

        match receiver.await {
            Ok(true) => Ok(()),
            _ => Err(FacilityMapError::ProviderLoad(format!(
                "failed to load script {}",
                self.sdk_url
            ))),
        }
    }

    async fn initialize(&self) -> Result<(), FacilityMapError> {
        let mut executor = |resolve: js_sys::Function, reject: js_sys::Function| {
            if let Err(err) = kakao::load(&resolve) {
                let _ = reject.call1(&JsValue::NULL, &err);
            }
        };

        JsFuture::from(js_sys::Promise::new(&mut executor))
            .await
            .map_err(|err| FacilityMapError::ProviderInit(format!("{err:?}")))?;

        Ok(())
    }

    fn create_surface(
        &self,
        container_id: &str,
        center: &LatLng,
        zoom_level: u32,
    ) -> Result<KakaoMap, FacilityMapError> {
        let container = document()?.get_element_by_id(container_id).ok_or_else(|| {
            FacilityMapError::Render(format!("container element '{container_id}' not found"))
        })?;

        let options = options(&[
            ("center", center.as_ref()),
            ("level", &JsValue::from(zoom_level)),
        ]);

        KakaoMap::new(&container, &options)
            .map_err(|err| FacilityMapError::Render(format!("{err:?}")))
    }

    fn create_position(&self, point: &GeoPoint2d) -> LatLng {
        LatLng::new(point.lat(), point.lng())
    }

    fn create_icon(&self, spec: &IconSpec) -> MarkerImage {
        let size = KakaoSize::new(f64::from(spec.size.width()), f64::from(spec.size.height()));
        let offset = KakaoPoint::new(spec.anchor.x, spec.anchor.y);

        MarkerImage::new(spec.url, &size, &options(&[("offset", offset.as_ref())]))
    }

    fn create_marker(&self, position: &LatLng, icon: &MarkerImage) -> Marker {
        Marker::new(&options(&[
            ("position", position.as_ref()),
            ("image", icon.as_ref()),
        ]))
    }

    fn create_overlay(&self, position: &LatLng, content: &str, y_anchor: f64) -> CustomOverlay {
        CustomOverlay::new(&options(&[
            ("position", position.as_ref()),
            ("content", &JsValue::from_str(content)),
            ("yAnchor", &JsValue::from(y_anchor)),
        ]))
    }

    fn on_marker_click(&self, marker: &Marker, handler: MarkerClickHandler) {
        let listener = Closure::<dyn Fn()>::new(move || handler()).into_js_value();
        kakao::add_listener(marker.as_ref(), "click", listener.unchecked_ref());
    }

    fn attach_marker(&self, marker: &Marker, surface: &KakaoMap) {
        marker.set_map(Some(surface));
    }

    fn detach_marker(&self, marker: &Marker) {
        marker.set_map(None);
    }

    fn attach_overlay(&self, overlay: &CustomOverlay, surface: &KakaoMap) {
        overlay.set_map(Some(surface));
    }

    fn detach_overlay(&self, overlay: &CustomOverlay) {
        overlay.set_map(None);
    }
}

fn document() -> Result<Document, FacilityMapError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| FacilityMapError::Wasm(Some("document is not available".into())))
}

fn options(entries: &[(&str, &JsValue)]) -> JsValue {
    let object = js_sys::Object::new();
    for (key, value) in entries {
        // Plain objects are always extensible.
        let _ = js_sys::Reflect::set(&object, &JsValue::from_str(key), value);
    }

    object.into()
}

fn script_event_closure(
    sender: Rc<RefCell<Option<oneshot::Sender<bool>>>>,
    loaded: bool,
) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        if let Some(sender) = sender.borrow_mut().take() {
            let _ = sender.send(loaded);
        }
    }) as Box<dyn FnMut()>)
}

/// Page layout of a facility map: the full-size map container, the legend panel over its
/// top-right corner and the status placeholder.
pub struct MapHost {
    container: Element,
    legend: Element,
    status: Element,
}

impl MapHost {
    /// Creates the layout inside the `root` element, replacing anything the element contained.
    /// The map container gets the id from the configuration, so it must be created before the
    /// map is mounted.
    pub fn new(root: Element, config: &MapConfig) -> Result<Self, FacilityMapError> {
        let document = document()?;

        root.set_inner_html("");
        root.set_attribute("style", "position: relative; width: 100%; height: 100vh;")?;

        let container = document.create_element("div")?;
        container.set_id(&config.container_id);
        container.set_attribute("style", "width: 100%; height: 100%;")?;

        let legend = document.create_element("div")?;
        legend.set_attribute("style", "display: none;")?;

        let status = document.create_element("div")?;

        root.append_child(&container)?;
        root.append_child(&legend)?;
        root.append_child(&status)?;

        Ok(Self {
            container,
            legend,
            status,
        })
    }

    /// The element the map surface is rendered into.
    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Removes the elements of this layout from the page. A layout created later in the same root
    /// is not affected.
    pub fn remove(&self) {
        self.container.remove();
        self.legend.remove();
        self.status.remove();
    }

    /// Updates the page to show the given component output.
    pub fn show(&self, output: &MapOutput) -> Result<(), FacilityMapError> {
        match output {
            MapOutput::Loading { message } => {
                self.legend.set_attribute("style", "display: none;")?;
                self.status.set_text_content(Some(message));
            }
            MapOutput::Failed { message } => {
                self.legend.set_attribute("style", "display: none;")?;
                self.status
                    .set_text_content(Some(&format!("Failed to load the map: {message}")));
            }
            MapOutput::Map { legend, .. } => {
                self.status.set_text_content(None);
                self.legend.remove_attribute("style")?;
                self.legend.set_inner_html(&legend.to_html());
            }
        }

        Ok(())
    }
}
