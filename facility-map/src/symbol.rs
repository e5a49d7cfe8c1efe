//! Visual encoding of facilities: marker icons for facility kinds and the status overlay for
//! facilities that are not operating.

use facility_map_types::cartesian::{Point2d, Size};

use crate::facility::{FacilityKind, FacilityStatus};

/// Image of the hospital marker.
pub const HOSPITAL_ICON_URL: &str = "https://maps.google.com/mapfiles/ms/icons/green-dot.png";
/// Image of the shelter marker.
pub const SHELTER_ICON_URL: &str = "https://maps.google.com/mapfiles/ms/icons/orange-dot.png";

const ICON_SIZE: u32 = 32;

/// Marker icon variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerIcon {
    /// Green pin.
    Hospital,
    /// Orange pin.
    Shelter,
}

impl MarkerIcon {
    /// All icon variants, in legend order.
    pub const ALL: [MarkerIcon; 2] = [MarkerIcon::Hospital, MarkerIcon::Shelter];

    /// Selects the icon for a facility kind.
    ///
    /// Facilities of unrecognized kinds are drawn with the shelter icon.
    pub fn for_kind(kind: &FacilityKind) -> Self {
        match kind {
            FacilityKind::Hospital => Self::Hospital,
            FacilityKind::Shelter | FacilityKind::Other(_) => Self::Shelter,
        }
    }

    /// Url of the icon image.
    pub fn url(&self) -> &'static str {
        match self {
            Self::Hospital => HOSPITAL_ICON_URL,
            Self::Shelter => SHELTER_ICON_URL,
        }
    }

    /// Full description of the marker image.
    ///
    /// The image is anchored at the middle of its bottom edge, so the tip of the pin points at
    /// the facility.
    pub fn spec(&self) -> IconSpec {
        let size = Size::new(ICON_SIZE, ICON_SIZE);
        IconSpec {
            url: self.url(),
            size,
            anchor: Point2d::new(f64::from(size.half_width()), f64::from(size.height())),
        }
    }
}

/// Image used to draw a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct IconSpec {
    /// Url of the image.
    pub url: &'static str,
    /// Size of the image on the screen, in pixels.
    pub size: Size<u32>,
    /// Pixel of the image that is placed at the marker position, relative to the top-left corner.
    pub anchor: Point2d,
}

/// Glyph shown over facilities that are not operating.
pub struct StatusOverlay;

impl StatusOverlay {
    /// The glyph itself.
    pub const GLYPH: &'static str = "❌";

    /// Html content of the overlay element.
    pub const CONTENT: &'static str = concat!(
        r#"<div style="color: red; font-weight: bold; font-size: 20px; transform: translate(-50%, -100%);">"#,
        "❌",
        "</div>"
    );

    /// Vertical anchor of the overlay as a fraction of its height. `1.0` puts the bottom edge of
    /// the overlay at the marker position.
    pub const Y_ANCHOR: f64 = 1.0;

    /// Returns true if a facility with the given status gets the overlay.
    pub fn is_shown_for(status: &FacilityStatus) -> bool {
        match status {
            FacilityStatus::Operating => false,
            FacilityStatus::NotOperating(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn hospital_kind_uses_hospital_icon() {
        assert_eq!(
            MarkerIcon::for_kind(&FacilityKind::Hospital).url(),
            HOSPITAL_ICON_URL
        );
    }

    #[test]
    fn other_kinds_use_shelter_icon() {
        for kind in [
            FacilityKind::Shelter,
            FacilityKind::Other("pharmacy".into()),
            FacilityKind::Other(String::new()),
            FacilityKind::from("HOSPITAL"),
        ] {
            assert_eq!(MarkerIcon::for_kind(&kind).url(), SHELTER_ICON_URL, "{kind:?}");
        }
    }

    #[test]
    fn icon_is_anchored_at_bottom_center() {
        let spec = MarkerIcon::Hospital.spec();
        assert_eq!(spec.size, Size::new(32, 32));
        assert_relative_eq!(spec.anchor.x, 16.0);
        assert_relative_eq!(spec.anchor.y, 32.0);
    }

    #[test]
    fn overlay_only_for_non_operating() {
        assert!(!StatusOverlay::is_shown_for(&FacilityStatus::Operating));
        assert!(StatusOverlay::is_shown_for(&FacilityStatus::NotOperating(None)));
        assert!(StatusOverlay::is_shown_for(&FacilityStatus::from("")));
        assert!(StatusOverlay::is_shown_for(&FacilityStatus::from("closed")));
    }

    #[test]
    fn overlay_content_contains_glyph() {
        assert!(StatusOverlay::CONTENT.contains(StatusOverlay::GLYPH));
    }
}
