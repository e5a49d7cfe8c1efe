//! Legend panel shown in the top-right corner of the map.

use serde::{Deserialize, Serialize};

use crate::symbol::{MarkerIcon, StatusOverlay};

/// Language of the legend labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendLocale {
    /// English labels.
    #[default]
    English,
    /// Korean labels.
    Korean,
}

/// What a legend entry shows next to its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendSymbol {
    /// Marker image.
    Icon(MarkerIcon),
    /// Status overlay glyph.
    InactiveGlyph,
}

/// One row of the legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    /// Symbol.
    pub symbol: LegendSymbol,
    /// Text next to the symbol.
    pub label: &'static str,
}

/// Static legend listing the visual encodings used on the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    title: &'static str,
    entries: Vec<LegendEntry>,
}

impl Default for Legend {
    fn default() -> Self {
        Self::new(LegendLocale::English)
    }
}

impl Legend {
    /// Creates the legend with labels in the given language.
    pub fn new(locale: LegendLocale) -> Self {
        match locale {
            LegendLocale::English => {
                Self::with_labels("Legend", ["Hospital", "Shelter"], "Not operating")
            }
            LegendLocale::Korean => Self::korean(),
        }
    }

    /// Legend with Korean labels.
    pub fn korean() -> Self {
        Self::with_labels("범례", ["병원", "대피소"], "운영 중 아님")
    }

    /// Icon labels go in the order of [`MarkerIcon::ALL`].
    fn with_labels(
        title: &'static str,
        icon_labels: [&'static str; 2],
        inactive_label: &'static str,
    ) -> Self {
        let entries = MarkerIcon::ALL
            .into_iter()
            .zip(icon_labels)
            .map(|(icon, label)| LegendEntry {
                symbol: LegendSymbol::Icon(icon),
                label,
            })
            .chain(std::iter::once(LegendEntry {
                symbol: LegendSymbol::InactiveGlyph,
                label: inactive_label,
            }))
            .collect();

        Self { title, entries }
    }

    /// Title of the panel.
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Legend rows, in display order.
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Renders the legend panel as an html fragment, positioned over the top-right corner of its
    /// parent element.
    pub fn to_html(&self) -> String {
        const PANEL_STYLE: &str = "position: absolute; top: 10px; right: 10px; \
            background-color: white; padding: 10px; border-radius: 8px; \
            box-shadow: 0 2px 6px rgba(0, 0, 0, 0.2); z-index: 10; font-size: 14px; \
            line-height: 1.6;";
        const ROW_STYLE: &str = "display: flex; align-items: center; gap: 6px; margin-top: 4px;";

        let mut html = format!(r#"<div style="{PANEL_STYLE}"><strong>{}</strong>"#, self.title);
        for entry in &self.entries {
            let symbol = match entry.symbol {
                LegendSymbol::Icon(icon) => {
                    format!(r#"<img src="{}" alt="{}" width="20" />"#, icon.url(), entry.label)
                }
                LegendSymbol::InactiveGlyph => format!(
                    r#"<span style="color: red; font-weight: bold; font-size: 18px;">{}</span>"#,
                    StatusOverlay::GLYPH
                ),
            };
            html.push_str(&format!(
                r#"<div style="{ROW_STYLE}">{symbol}{}</div>"#,
                entry.label
            ));
        }
        html.push_str("</div>");

        html
    }
}
