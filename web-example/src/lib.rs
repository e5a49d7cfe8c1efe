//! Mounts a facility map into a browser page.
//!
//! Build with `wasm-pack build web-example --target web` and call `run` from the page:
//!
//! ```js
//! import init, { run } from "./pkg/facility_map_web_example.js";
//!
//! await init();
//! run("app", JSON.stringify({ app_key: "..." }), JSON.stringify(facilities), (facility) => {
//!     console.log(JSON.parse(facility));
//! });
//! ```
//!
//! If the map provider fails to load, the page shows the error and `retry()` loads it again.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::sync::Arc;

use facility_map::platform::web::{KakaoProvider, MapHost};
use facility_map::provider::{MountLifetime, ProviderBootstrap};
use facility_map::{parse_facilities, Facility, FacilityMap, FacilityMapError, MapConfig};
use wasm_bindgen::prelude::*;

struct App {
    map: FacilityMap<KakaoProvider>,
    host: MapHost,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static LIFETIME: RefCell<Option<MountLifetime>> = const { RefCell::new(None) };
}

/// Creates the map inside the element with id `root_id` and shows the facilities on it.
///
/// `on_select` is called with the json representation of the facility whenever a marker is
/// clicked.
#[wasm_bindgen]
pub fn run(
    root_id: &str,
    config_json: &str,
    facilities_json: &str,
    on_select: js_sys::Function,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    unmount();

    let config = MapConfig::from_json(config_json).map_err(to_js)?;
    let facilities = parse_facilities(facilities_json).map_err(to_js)?;

    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(root_id))
        .ok_or_else(|| JsValue::from_str(&format!("element '{root_id}' not found")))?;

    let host = MapHost::new(root, &config).map_err(to_js)?;
    let provider = Arc::new(KakaoProvider::from_config(&config).map_err(to_js)?);
    let mut map = FacilityMap::new(Arc::new(ProviderBootstrap::new(provider)), config);
    host.show(&map.view()).map_err(to_js)?;

    let lifetime = MountLifetime::new();
    LIFETIME.with(|cell| *cell.borrow_mut() = Some(lifetime.clone()));

    wasm_bindgen_futures::spawn_local(async move {
        match map.mount(&lifetime).await {
            Ok(()) => {}
            Err(FacilityMapError::Unmounted) => {
                host.remove();
                return;
            }
            Err(err) => log::error!("Failed to mount facility map: {err}"),
        }

        let result = map
            .set_on_marker_click(Some(Arc::new(move |facility: &Facility| {
                notify(&on_select, facility)
            })))
            .and_then(|()| map.set_facilities(facilities))
            .and_then(|()| host.show(&map.view()));
        if let Err(err) = result {
            log::error!("Failed to render facilities: {err}");
        }

        APP.with(|cell| *cell.borrow_mut() = Some(App { map, host }));
    });

    Ok(())
}

/// Loads the map provider again after a failed load and renders the facilities.
#[wasm_bindgen]
pub fn retry() {
    let Some(lifetime) = LIFETIME.with(|cell| cell.borrow().clone()) else {
        return;
    };
    let Some(mut app) = APP.with(|cell| cell.borrow_mut().take()) else {
        log::warn!("Nothing to retry: the map is not mounted or is still loading");
        return;
    };

    wasm_bindgen_futures::spawn_local(async move {
        match app.map.retry(&lifetime).await {
            Ok(()) => {}
            Err(FacilityMapError::Unmounted) => {
                app.host.remove();
                return;
            }
            Err(err) => log::error!("Failed to load facility map: {err}"),
        }

        if let Err(err) = app.host.show(&app.map.view()) {
            log::error!("Failed to show facility map: {err}");
        }

        APP.with(|cell| *cell.borrow_mut() = Some(app));
    });
}

/// Removes the map from the page. A load that is still in progress is cancelled.
#[wasm_bindgen]
pub fn unmount() {
    let lifetime = LIFETIME.with(|cell| cell.borrow_mut().take());
    let app = APP.with(|cell| cell.borrow_mut().take());

    match (app, lifetime) {
        (Some(mut app), Some(lifetime)) => {
            app.map.unmount(&lifetime);
            app.host.remove();
        }
        (None, Some(lifetime)) => lifetime.end(),
        _ => {}
    }
}

fn notify(on_select: &js_sys::Function, facility: &Facility) {
    match serde_json::to_string(facility) {
        Ok(json) => {
            if let Err(err) = on_select.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::error!("Selection callback failed: {err:?}");
            }
        }
        Err(err) => log::error!("Failed to serialize facility: {err}"),
    }
}

fn to_js(err: FacilityMapError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
