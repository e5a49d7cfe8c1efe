//! Platform specific map providers.
//!
//! On `wasm32` targets the [`web`] module provides [`KakaoProvider`](web::KakaoProvider), a
//! [`MapProvider`](crate::provider::MapProvider) backed by the Kakao Maps JavaScript SDK, and
//! [`MapHost`](web::MapHost), which lays out the map container, the legend and the loading
//! placeholder in the page.

#[cfg(target_arch = "wasm32")]
pub mod web;
