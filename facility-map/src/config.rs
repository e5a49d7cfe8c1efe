use std::collections::HashMap;

use facility_map_types::geo::GeoPoint2d;
use facility_map_types::latlon;
use serde::{Deserialize, Serialize};

use crate::error::FacilityMapError;
use crate::legend::LegendLocale;

const DEFAULT_SDK_URL_TEMPLATE: &str =
    "//dapi.kakao.com/v2/maps/sdk.js?appkey={app_key}&autoload=false";

/// Configuration of a [`FacilityMap`](crate::FacilityMap).
///
/// All fields have defaults, so a partial json document is a valid configuration:
///
/// ```
/// use facility_map::MapConfig;
///
/// let config = MapConfig::from_json(r#"{"app_key": "0123", "zoom_level": 7}"#).unwrap();
/// assert_eq!(config.zoom_level, 7);
/// assert_eq!(config.container_id, "map");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Id of the html element the map is rendered into.
    pub container_id: String,
    /// Initial center of the map. The map is not re-centered to fit the facilities.
    pub center: GeoPoint2d,
    /// Initial zoom level of the map, in the provider units.
    pub zoom_level: u32,
    /// Url of the provider script, with an `{app_key}` placeholder.
    pub sdk_url_template: String,
    /// Application key for the provider.
    pub app_key: Option<String>,
    /// Text shown while the provider is loading.
    pub loading_message: String,
    /// Language of the legend.
    pub legend_locale: LegendLocale,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: "map".to_string(),
            center: latlon!(37.613, 127.005),
            zoom_level: 5,
            sdk_url_template: DEFAULT_SDK_URL_TEMPLATE.to_string(),
            app_key: None,
            loading_message: "Loading map...".to_string(),
            legend_locale: LegendLocale::default(),
        }
    }
}

impl MapConfig {
    /// Parses the configuration from a json document.
    pub fn from_json(json: &str) -> Result<Self, FacilityMapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the id of the container element.
    pub fn with_container_id(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = container_id.into();
        self
    }

    /// Sets the initial center of the map.
    pub fn with_center(mut self, center: GeoPoint2d) -> Self {
        self.center = center;
        self
    }

    /// Sets the initial zoom level of the map.
    pub fn with_zoom_level(mut self, zoom_level: u32) -> Self {
        self.zoom_level = zoom_level;
        self
    }

    /// Sets the application key for the provider.
    pub fn with_app_key(mut self, app_key: impl Into<String>) -> Self {
        self.app_key = Some(app_key.into());
        self
    }

    /// Sets the language of the legend.
    pub fn with_legend_locale(mut self, locale: LegendLocale) -> Self {
        self.legend_locale = locale;
        self
    }

    /// Url of the provider script with the application key filled in.
    pub fn sdk_url(&self) -> Result<String, FacilityMapError> {
        let app_key = self
            .app_key
            .as_ref()
            .ok_or_else(|| FacilityMapError::Config("app_key is not set".into()))?;

        let mut vars = HashMap::new();
        vars.insert("app_key".to_string(), app_key.clone());

        strfmt::strfmt(&self.sdk_url_template, &vars)
            .map_err(|err| FacilityMapError::Config(format!("invalid sdk_url_template: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use facility_map_types::geo::GeoPoint;

    use super::*;

    #[test]
    fn defaults() {
        let config = MapConfig::default();

        assert_eq!(config.container_id, "map");
        assert_relative_eq!(config.center.lat(), 37.613);
        assert_relative_eq!(config.center.lng(), 127.005);
        assert_eq!(config.zoom_level, 5);
        assert_eq!(config.legend_locale, LegendLocale::English);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MapConfig::from_json(
            r#"{"center": {"lat": 35.1, "lng": 129.0}, "legend_locale": "korean"}"#,
        )
        .unwrap();

        assert_eq!(config.center, latlon!(35.1, 129.0));
        assert_eq!(config.legend_locale, LegendLocale::Korean);
        assert_eq!(config.zoom_level, 5);
    }

    #[test]
    fn sdk_url_fills_app_key() {
        let config = MapConfig::default().with_app_key("abc123");
        assert_eq!(
            config.sdk_url().unwrap(),
            "//dapi.kakao.com/v2/maps/sdk.js?appkey=abc123&autoload=false"
        );
    }

    #[test]
    fn sdk_url_requires_app_key() {
        assert_matches!(MapConfig::default().sdk_url(), Err(FacilityMapError::Config(_)));
    }

    #[test]
    fn sdk_url_rejects_unknown_placeholder() {
        let mut config = MapConfig::default().with_app_key("abc123");
        config.sdk_url_template = "https://example.com/sdk.js?key={api_key}".into();

        assert_matches!(config.sdk_url(), Err(FacilityMapError::Config(_)));
    }

    #[test]
    fn builder_setters() {
        let config = MapConfig::default()
            .with_container_id("facilities")
            .with_center(latlon!(35.1, 129.0))
            .with_zoom_level(3)
            .with_legend_locale(LegendLocale::Korean);

        assert_eq!(config.container_id, "facilities");
        assert_eq!(config.center, latlon!(35.1, 129.0));
        assert_eq!(config.zoom_level, 3);
        assert_eq!(config.legend_locale, LegendLocale::Korean);
    }
}
