//! Tagged attribute values carried by nodes, edges and rendered elements.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Open-ended attribute map keyed by attribute name.
pub type Attributes = BTreeMap<String, AttrValue>;

/// A single attribute value.
///
/// Values serialize as bare JSON scalars, so a node-link document such as
/// `{"size": 3, "category": "A"}` maps onto `Int(3)` and `Text("A")`.
///
/// # Examples
/// ```
/// use graphdash_core::AttrValue;
///
/// assert_eq!(AttrValue::from(2.0).to_string(), "2.0");
/// assert_eq!(AttrValue::from(0.25).to_string(), "0.25");
/// assert_eq!(AttrValue::from("A").to_string(), "A");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Free-form text.
    Text(String),
}

impl AttrValue {
    /// Returns the text payload when the value is a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Int(number) => write!(f, "{number}"),
            // Integral floats keep a fractional digit so `2.0` and `2` stay distinct.
            Self::Float(number) if number.is_finite() && number.fract() == 0.0 => {
                write!(f, "{number:.1}")
            }
            Self::Float(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
