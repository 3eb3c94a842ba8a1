//! Color legend for the selected attribute.

use serde::Serialize;

use crate::{
    error::StyleError,
    palette::{ColorMappings, Rgb},
};

/// One swatch of the legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    /// Attribute value.
    pub value: String,
    /// Color assigned to the value.
    pub color: Rgb,
}

/// What the legend panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Legend {
    /// No attribute is selected; the panel is hidden.
    Hidden,
    /// The selected attribute has no color mapping.
    Unavailable {
        /// Selected attribute.
        attribute: String,
    },
    /// Swatches for every value of the selected attribute.
    Entries {
        /// Selected attribute.
        attribute: String,
        /// Swatches in value order.
        entries: Vec<LegendEntry>,
    },
}

impl Legend {
    /// Builds the legend for `color_attribute`.
    #[must_use]
    pub fn for_attribute(color_attribute: Option<&str>, mappings: &ColorMappings) -> Self {
        let Some(attribute) = color_attribute else {
            return Self::Hidden;
        };
        match mappings.get(attribute) {
            None => Self::Unavailable {
                attribute: attribute.to_owned(),
            },
            Some(colors) => Self::Entries {
                attribute: attribute.to_owned(),
                entries: colors
                    .iter()
                    .map(|(value, &color)| LegendEntry {
                        value: value.clone(),
                        color,
                    })
                    .collect(),
            },
        }
    }

    /// Rebuilds the legend from the serialized color-mapping payload.
    ///
    /// # Errors
    /// Returns [`StyleError::MalformedPayload`] when an attribute is selected
    /// and the payload cannot be parsed.
    pub fn from_payload(color_attribute: Option<&str>, payload: &str) -> Result<Self, StyleError> {
        if color_attribute.is_none() {
            return Ok(Self::Hidden);
        }
        let mappings = ColorMappings::from_payload(payload)?;
        Ok(Self::for_attribute(color_attribute, &mappings))
    }

    /// Returns `true` when the legend panel should be displayed.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}
