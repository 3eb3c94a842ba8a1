//! Stylesheet rules for the rendering widget.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::{error::StyleError, palette::ColorMappings};

/// A selector and the style properties applied to matching elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    /// Widget selector, e.g. `node:selected`.
    pub selector: String,
    /// Style properties.
    pub style: Map<String, Value>,
}

impl StyleRule {
    fn new(selector: impl Into<String>, style: Value) -> Self {
        let style = match style {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            selector: selector.into(),
            style,
        }
    }
}

/// Styles applied regardless of coloring: nodes, selected nodes, edges and
/// the edges touching selected nodes.
#[must_use]
pub fn base_stylesheet() -> Vec<StyleRule> {
    vec![
        StyleRule::new(
            "node",
            json!({
                "background-color": "#6272A3",
                "label": "data(label)",
                "width": 30,
                "height": 30,
                "text-valign": "center",
                "text-halign": "center",
                "color": "white",
            }),
        ),
        StyleRule::new(
            "node:selected",
            json!({
                "background-color": "#FF7700",
                "border-width": 3,
                "border-color": "#FFD700",
                "width": 40,
                "height": 40,
                "text-outline-color": "#000000",
                "text-outline-width": 1,
                "font-size": 14,
                "z-index": 10,
            }),
        ),
        StyleRule::new(
            "edge",
            json!({
                "width": 2,
                "line-color": "#A3627C",
                "target-arrow-color": "#A3627C",
                "target-arrow-shape": "triangle",
                "curve-style": "bezier",
                "label": "data(label)",
                "text-rotation": "autorotate",
                "text-margin-y": -10,
                "color": "#555",
            }),
        ),
        StyleRule::new(
            "node:selected ~ edge, edge[source = 'node:selected'], edge[target = 'node:selected']",
            json!({
                "width": 3,
                "line-color": "#FFB6C1",
                "target-arrow-color": "#FFB6C1",
                "opacity": 1,
            }),
        ),
    ]
}

/// One `background-color` rule per value of `attribute`.
///
/// Returns no rules when `attribute` has no mapping.
///
/// # Examples
/// ```
/// use graphdash_core::{AttrValue, Attributes, assign_colors, classify, color_rules};
///
/// let nodes: Vec<Attributes> = ["A", "B"]
///     .into_iter()
///     .map(|c| Attributes::from([("category".to_owned(), AttrValue::from(c))]))
///     .collect();
/// let rules = color_rules("category", &assign_colors(&classify(&nodes)));
/// assert_eq!(rules[0].selector, "node[category = 'A']");
/// ```
#[must_use]
pub fn color_rules(attribute: &str, mappings: &ColorMappings) -> Vec<StyleRule> {
    let Some(colors) = mappings.get(attribute) else {
        return Vec::new();
    };
    colors
        .iter()
        .map(|(value, color)| {
            StyleRule::new(
                format!("node[{attribute} = '{}']", escape_quotes(value)),
                json!({ "background-color": color.to_string() }),
            )
        })
        .collect()
}

/// Full stylesheet for the selected color attribute.
#[must_use]
pub fn stylesheet(color_attribute: Option<&str>, mappings: &ColorMappings) -> Vec<StyleRule> {
    let mut rules = base_stylesheet();
    if let Some(attribute) = color_attribute {
        rules.extend(color_rules(attribute, mappings));
    }
    rules
}

/// Rebuilds the stylesheet from the serialized color-mapping payload, as the
/// dashboard does whenever the color attribute changes.
///
/// The payload is only parsed when an attribute is selected.
///
/// # Errors
/// Returns [`StyleError::MalformedPayload`] when the payload cannot be
/// parsed. The failure affects this render only.
pub fn restyle(color_attribute: Option<&str>, payload: &str) -> Result<Vec<StyleRule>, StyleError> {
    match color_attribute {
        None => Ok(base_stylesheet()),
        Some(attribute) => {
            let mappings = ColorMappings::from_payload(payload)?;
            Ok(stylesheet(Some(attribute), &mappings))
        }
    }
}

fn escape_quotes(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
