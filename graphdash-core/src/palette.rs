//! Deterministic color assignment for categorical attributes.
//!
//! `k` colors sit at evenly spaced hues `i / k` with fixed saturation and
//! brightness, so the same value set always yields the same palette.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;
use tracing::{info, instrument};

use crate::{classify::CategoricalAttributes, error::StyleError};

/// Saturation shared by every generated color.
pub const SATURATION: f64 = 0.7;

/// Brightness shared by every generated color.
pub const BRIGHTNESS: f64 = 0.9;

/// An sRGB color rendered as `#rrggbb`.
///
/// # Examples
/// ```
/// use graphdash_core::Rgb;
///
/// let color: Rgb = "#E54444".parse()?;
/// assert_eq!(color, Rgb::new(0xe5, 0x44, 0x44));
/// assert_eq!(color.to_string(), "#e54444");
/// # Ok::<(), graphdash_core::ParseRgbError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Builds a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts an HSV triple with components in `[0, 1]`.
    ///
    /// Channels are truncated from `component * 255`.
    #[must_use]
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let (r, g, b) = hsv_to_rgb(hue, saturation, value);
        Self::new(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned when a string is not a `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a `#rrggbb` color, got `{0}`")]
pub struct ParseRgbError(String);

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseRgbError(raw.to_owned());
        let hex = raw.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte_at = |start: usize| {
            hex.get(start..start + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(invalid)
        };
        Ok(Self::new(byte_at(0)?, byte_at(2)?, byte_at(4)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> (f64, f64, f64) {
    if saturation == 0.0 {
        return (value, value, value);
    }
    let scaled = hue * 6.0;
    let sector = scaled.floor();
    let fraction = scaled - sector;
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * fraction);
    let t = value * (1.0 - saturation * (1.0 - fraction));
    match sector.rem_euclid(6.0) as u8 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    }
}

fn channel(component: f64) -> u8 {
    // `as` saturates, which also clamps rounding noise outside [0, 1].
    (component * 255.0) as u8
}

/// Generates `count` colors at evenly spaced hues.
///
/// # Examples
/// ```
/// use graphdash_core::palette;
///
/// let colors: Vec<String> = palette(3).iter().map(ToString::to_string).collect();
/// assert_eq!(colors, ["#e54444", "#44e544", "#4444e5"]);
/// ```
#[must_use]
pub fn palette(count: usize) -> Vec<Rgb> {
    (0..count)
        .map(|index| {
            #[expect(
                clippy::cast_precision_loss,
                reason = "palette sizes are far below f64 precision limits"
            )]
            let hue = index as f64 / count as f64;
            Rgb::from_hsv(hue, SATURATION, BRIGHTNESS)
        })
        .collect()
}

/// Attribute name → value → color.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorMappings(BTreeMap<String, BTreeMap<String, Rgb>>);

impl ColorMappings {
    /// Value → color mapping for `attribute`.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&BTreeMap<String, Rgb>> {
        self.0.get(attribute)
    }

    /// Color assigned to `value` of `attribute`.
    #[must_use]
    pub fn color(&self, attribute: &str, value: &str) -> Option<Rgb> {
        self.0.get(attribute)?.get(value).copied()
    }

    /// Attributes with their mappings.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Rgb>)> {
        self.0.iter().map(|(name, colors)| (name.as_str(), colors))
    }

    /// Returns `true` when no attribute is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the mappings as the JSON payload handed to the dashboard.
    #[must_use]
    pub fn to_payload(&self) -> String {
        // Maps of strings cannot fail to encode.
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    /// Decodes a JSON payload produced by [`Self::to_payload`].
    ///
    /// # Errors
    /// Returns [`StyleError::MalformedPayload`] when the payload is not valid
    /// JSON or contains something other than `#rrggbb` colors.
    pub fn from_payload(payload: &str) -> Result<Self, StyleError> {
        serde_json::from_str(payload).map_err(|source| StyleError::MalformedPayload { source })
    }
}

/// Assigns one color per distinct value of every categorical attribute.
///
/// Values are colored in sorted order; attributes are independent of each
/// other.
#[instrument(name = "assign_colors", skip(categorical), fields(attributes = categorical.len()))]
pub fn assign_colors(categorical: &CategoricalAttributes) -> ColorMappings {
    let mappings = categorical
        .iter()
        .map(|(attribute, values)| {
            let colors: BTreeMap<String, Rgb> = values
                .iter()
                .cloned()
                .zip(palette(values.len()))
                .collect();
            info!(
                attribute,
                mapping = %render_mapping(&colors),
                "generated color mapping"
            );
            (attribute.to_owned(), colors)
        })
        .collect();
    ColorMappings(mappings)
}

fn render_mapping(colors: &BTreeMap<String, Rgb>) -> String {
    colors
        .iter()
        .map(|(value, color)| format!("{value}={color}"))
        .collect::<Vec<_>>()
        .join(", ")
}
