//! Error types used by the crate.

use facility_map_types::error::FacilityMapTypesError;
use thiserror::Error;

/// Facility map error type.
#[derive(Debug, Error)]
pub enum FacilityMapError {
    /// The map provider script could not be fetched or executed.
    #[error("failed to load map provider: {0}")]
    ProviderLoad(String),
    /// The provider script was loaded, but its own initialization failed.
    #[error("failed to initialize map provider: {0}")]
    ProviderInit(String),
    /// The provider could not construct the map surface or its objects.
    #[error("failed to render map: {0}")]
    Render(String),
    /// A facility record failed validation.
    #[error(
        "invalid facility{}: {reason}",
        .index.map(|index| format!(" at index {index}")).unwrap_or_default()
    )]
    InvalidFacility {
        /// Position of the record in the input list, if known.
        index: Option<usize>,
        /// What is wrong with the record.
        reason: String,
    },
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The component was unmounted before the operation could complete.
    #[error("component is unmounted")]
    Unmounted,
    /// Error decoding JSON input.
    #[error("failed to decode json: {0}")]
    Json(#[from] serde_json::Error),
    /// Error interacting with WASM runtime.
    #[error("wasm error: {0:?}")]
    Wasm(Option<String>),
}

impl FacilityMapError {
    /// Attaches the position of the offending record to an [`FacilityMapError::InvalidFacility`]
    /// error. Other errors are returned unchanged.
    pub fn at_index(self, position: usize) -> Self {
        match self {
            Self::InvalidFacility { reason, .. } => Self::InvalidFacility {
                index: Some(position),
                reason,
            },
            other => other,
        }
    }
}

impl From<FacilityMapTypesError> for FacilityMapError {
    fn from(value: FacilityMapTypesError) -> Self {
        Self::InvalidFacility {
            index: None,
            reason: value.to_string(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FacilityMapError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        FacilityMapError::Wasm(Some(format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<web_sys::Element> for FacilityMapError {
    fn from(value: web_sys::Element) -> Self {
        FacilityMapError::Wasm(Some(format!("Failed to cast {value:?} into target type")))
    }
}
