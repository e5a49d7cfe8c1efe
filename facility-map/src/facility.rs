use std::sync::Arc;

use facility_map_types::geo::{GeoPoint, GeoPoint2d};
use serde::{Deserialize, Serialize};

use crate::error::FacilityMapError;

/// Ordered list of facilities given to the map.
///
/// The map re-renders only when it gets a list that is not the same allocation as the current one
/// (compared with [`Arc::ptr_eq`]), so keep the `Arc` around if the list did not change.
pub type FacilityList = Arc<[Facility]>;

/// Category of a facility. It decides which marker icon is used for the facility.
///
/// Any category other than hospitals and shelters is kept as [`FacilityKind::Other`] with the
/// original value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FacilityKind {
    /// Hospital.
    Hospital,
    /// Shelter.
    Shelter,
    /// Unrecognized category.
    Other(String),
}

impl FacilityKind {
    /// Canonical name of the category.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hospital => "hospital",
            Self::Shelter => "shelter",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for FacilityKind {
    fn from(value: &str) -> Self {
        match value {
            "hospital" | "병원" => Self::Hospital,
            "shelter" | "대피소" => Self::Shelter,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Operational status of a facility.
///
/// Only the exact sentinel values `"operating"` and `"운영 중"` mean that the facility is in
/// service. Every other value, including an empty string or a missing status, is
/// [`FacilityStatus::NotOperating`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FacilityStatus {
    /// The facility is in service.
    Operating,
    /// The facility is not in service. Contains the original status value, if there was one.
    NotOperating(Option<String>),
}

impl FacilityStatus {
    /// Status value that marks an operating facility.
    pub const OPERATING: &'static str = "operating";

    /// Returns true if the facility is in service.
    pub fn is_operating(&self) -> bool {
        matches!(self, Self::Operating)
    }
}

impl From<&str> for FacilityStatus {
    fn from(value: &str) -> Self {
        match value {
            Self::OPERATING | "운영 중" => Self::Operating,
            other => Self::NotOperating(Some(other.to_string())),
        }
    }
}

impl From<Option<&str>> for FacilityStatus {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(value) => Self::from(value),
            None => Self::NotOperating(None),
        }
    }
}

/// Facility record as it comes from the outside world, before validation.
///
/// Fields the map does not use are kept in [`FacilityRecord::extra`], so the record can be
/// handed back to the application unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    /// Latitude in degrees.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude in degrees.
    #[serde(default)]
    pub lng: Option<f64>,
    /// Category of the facility.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Operational status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// All other fields of the record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A validated facility with a position on the map.
///
/// Facilities are immutable. A facility can only be created with a valid position, so every
/// facility the map gets can be placed as a marker. The record the facility was created from is
/// kept as is and is what the facility serializes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FacilityRecord", into = "FacilityRecord")]
pub struct Facility {
    position: GeoPoint2d,
    kind: FacilityKind,
    status: FacilityStatus,
    record: FacilityRecord,
}

impl Facility {
    /// Creates a new facility, validating its coordinates.
    pub fn new(
        lat: f64,
        lng: f64,
        kind: impl Into<String>,
        status: impl Into<String>,
    ) -> Result<Self, FacilityMapError> {
        Self::try_from(FacilityRecord {
            lat: Some(lat),
            lng: Some(lng),
            kind: Some(kind.into()),
            status: Some(status.into()),
            ..Default::default()
        })
    }

    /// Sets the display name of the facility.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.record.name = Some(name.into());
        self
    }

    /// Position of the facility.
    pub fn position(&self) -> GeoPoint2d {
        self.position
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.position.lat()
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.position.lng()
    }

    /// Category of the facility.
    pub fn kind(&self) -> &FacilityKind {
        &self.kind
    }

    /// Operational status of the facility.
    pub fn status(&self) -> &FacilityStatus {
        &self.status
    }

    /// Display name, if the record had one.
    pub fn name(&self) -> Option<&str> {
        self.record.name.as_deref()
    }

    /// The record the facility was created from.
    pub fn record(&self) -> &FacilityRecord {
        &self.record
    }
}

impl TryFrom<FacilityRecord> for Facility {
    type Error = FacilityMapError;

    fn try_from(record: FacilityRecord) -> Result<Self, Self::Error> {
        let (Some(lat), Some(lng)) = (record.lat, record.lng) else {
            return Err(FacilityMapError::InvalidFacility {
                index: None,
                reason: "both lat and lng are required".into(),
            });
        };

        Ok(Self {
            position: GeoPoint2d::try_latlon(lat, lng)?,
            kind: FacilityKind::from(record.kind.as_deref().unwrap_or_default()),
            status: FacilityStatus::from(record.status.as_deref()),
            record,
        })
    }
}

impl From<Facility> for FacilityRecord {
    fn from(value: Facility) -> Self {
        value.record
    }
}

/// Parses a JSON array of facility records.
///
/// Fails on the first record that cannot be turned into a [`Facility`], reporting its index.
pub fn parse_facilities(json: &str) -> Result<FacilityList, FacilityMapError> {
    let records: Vec<FacilityRecord> = serde_json::from_str(json)?;
    let facilities = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| Facility::try_from(record).map_err(|err| err.at_index(index)))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Parsed {} facilities", facilities.len());

    Ok(facilities.into())
}
