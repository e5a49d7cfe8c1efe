//! Bindings to the parts of the Kakao Maps JavaScript SDK used by the provider.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `kakao.maps.LatLng`
    #[wasm_bindgen(js_namespace = ["kakao", "maps"])]
    #[derive(Debug, Clone)]
    pub type LatLng;

    /// Creates a new coordinate.
    #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"])]
    pub fn new(lat: f64, lng: f64) -> LatLng;

    /// `kakao.maps.Map`
    #[wasm_bindgen(js_namespace = ["kakao", "maps"], js_name = Map)]
    #[derive(Debug, Clone)]
    pub type KakaoMap;

    /// Creates a map in the container element. `options` must contain `center` and `level`.
    #[wasm_bindgen(catch, constructor, js_namespace = ["kakao", "maps"], js_class = "Map")]
    pub fn new(container: &web_sys::Element, options: &JsValue) -> Result<KakaoMap, JsValue>;

    /// `kakao.maps.Size`
    #[wasm_bindgen(js_namespace = ["kakao", "maps"], js_name = Size)]
    #[derive(Debug, Clone)]
    pub type KakaoSize;

    /// Creates a new size in pixels.
    #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"], js_class = "Size")]
    pub fn new(width: f64, height: f64) -> KakaoSize;

    /// `kakao.maps.Point`
    #[wasm_bindgen(js_namespace = ["kakao", "maps"], js_name = Point)]
    #[derive(Debug, Clone)]
    pub type KakaoPoint;

    /// Creates a new screen point in pixels.
    #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"], js_class = "Point")]
    pub fn new(x: f64, y: f64) -> KakaoPoint;

    /// `kakao.maps.MarkerImage`
    #[wasm_bindgen(js_namespace = ["kakao", "maps"])]
    #[derive(Debug, Clone)]
    pub type MarkerImage;

    /// Creates a marker image. `options.offset` is the anchor point of the image.
    #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"])]
    pub fn new(src: &str, size: &KakaoSize, options: &JsValue) -> MarkerImage;

    /// `kakao.maps.Marker`
    #[wasm_bindgen(js_namespace = ["kakao", "maps"])]
    #[derive(Debug, Clone)]
    pub type Marker;

    /// Creates a marker. `options` must contain `position` and `image`.
    #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"])]
    pub fn new(options: &JsValue) -> Marker;

    /// Attaches the marker to the map, or detaches it if `map` is `None`.
    #[wasm_bindgen(method, js_name = setMap)]
    pub fn set_map(this: &Marker, map: Option<&KakaoMap>);

    /// `kakao.maps.CustomOverlay`
    #[wasm_bindgen(js_namespace = ["kakao", "maps"])]
    #[derive(Debug, Clone)]
    pub type CustomOverlay;

    /// Creates an html overlay. `options` must contain `position`, `content` and `yAnchor`.
    #[wasm_bindgen(constructor, js_namespace = ["kakao", "maps"])]
    pub fn new(options: &JsValue) -> CustomOverlay;

    /// Attaches the overlay to the map, or detaches it if `map` is `None`.
    #[wasm_bindgen(method, js_name = setMap)]
    pub fn set_map(this: &CustomOverlay, map: Option<&KakaoMap>);

    /// `kakao.maps.event.addListener`
    #[wasm_bindgen(js_namespace = ["kakao", "maps", "event"], js_name = addListener)]
    pub fn add_listener(target: &JsValue, event_type: &str, handler: &js_sys::Function);

    /// `kakao.maps.load`: calls the callback once the SDK is ready. Required when the SDK script is
    /// loaded with `autoload=false`.
    #[wasm_bindgen(catch, js_namespace = ["kakao", "maps"], js_name = load)]
    pub fn load(callback: &js_sys::Function) -> Result<(), JsValue>;
}
