//! Categorical attribute detection.
//!
//! An attribute is categorical when it is not one of the structural keys the
//! widget uses for layout or identity and it takes between 2 and 10 distinct
//! values across the rendered nodes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{Span, field, info, instrument};

use crate::value::Attributes;

/// Keys that describe identity or geometry and are never used for coloring.
pub const RESERVED_KEYS: [&str; 9] = [
    "id", "name", "label", "x", "y", "z", "size", "width", "height",
];

/// Smallest number of distinct values a categorical attribute may take.
pub const MIN_DISTINCT_VALUES: usize = 2;

/// Largest number of distinct values a categorical attribute may take.
pub const MAX_DISTINCT_VALUES: usize = 10;

/// Categorical attributes and their distinct values in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoricalAttributes(BTreeMap<String, BTreeSet<String>>);

impl CategoricalAttributes {
    /// Distinct values of `attribute`, if it is categorical.
    #[must_use]
    pub fn values(&self, attribute: &str) -> Option<&BTreeSet<String>> {
        self.0.get(attribute)
    }

    /// Returns `true` when `attribute` is categorical.
    #[must_use]
    pub fn contains(&self, attribute: &str) -> bool {
        self.0.contains_key(attribute)
    }

    /// Attribute names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Attributes with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0.iter().map(|(name, values)| (name.as_str(), values))
    }

    /// Number of categorical attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no attribute qualified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Returns `true` for keys excluded from classification.
#[must_use]
pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Collects the categorical attributes of `nodes`.
///
/// Values are compared by their string form, so `1` and `"1"` count once.
///
/// # Examples
/// ```
/// use graphdash_core::{AttrValue, Attributes, classify};
///
/// let nodes: Vec<Attributes> = ["A", "B", "A"]
///     .into_iter()
///     .enumerate()
///     .map(|(i, c)| Attributes::from([
///         ("category".to_owned(), AttrValue::from(c)),
///         ("label".to_owned(), AttrValue::Text(format!("Node {i}"))),
///     ]))
///     .collect();
/// let categorical = classify(&nodes);
/// assert!(categorical.contains("category"));
/// assert!(!categorical.contains("label"));
/// ```
#[instrument(name = "classify", skip(nodes), fields(nodes = field::Empty))]
pub fn classify<'a, I>(nodes: I) -> CategoricalAttributes
where
    I: IntoIterator<Item = &'a Attributes>,
{
    let mut seen: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut node_count = 0_usize;
    for attributes in nodes {
        node_count += 1;
        for (key, value) in attributes {
            if is_reserved(key) {
                continue;
            }
            seen.entry(key.clone()).or_default().insert(value.to_string());
        }
    }
    Span::current().record("nodes", node_count);

    seen.retain(|_, values| (MIN_DISTINCT_VALUES..=MAX_DISTINCT_VALUES).contains(&values.len()));
    let categorical = CategoricalAttributes(seen);
    info!(
        attributes = ?categorical.names().collect::<Vec<_>>(),
        "found potential categorical attributes"
    );
    categorical
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    use crate::value::AttrValue;

    fn node(pairs: &[(&str, AttrValue)]) -> Attributes {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), value.clone()))
            .collect()
    }

    #[rstest]
    fn keeps_low_cardinality_and_drops_unique_values() {
        let nodes: Vec<Attributes> = (0..10_i64)
            .map(|i| {
                node(&[
                    ("category", AttrValue::from(["A", "B", "C"][(i % 3) as usize])),
                    ("importance", AttrValue::Float(0.05 + 0.09 * i as f64)),
                    ("rank", AttrValue::Int(i)),
                ])
            })
            .collect();
        let nodes_with_extra: Vec<Attributes> = nodes
            .iter()
            .cloned()
            .chain([node(&[("rank", AttrValue::Int(10))])])
            .collect();

        let categorical = classify(&nodes_with_extra);
        assert_eq!(
            categorical.values("category").map(|v| v.iter().cloned().collect::<Vec<_>>()),
            Some(vec!["A".to_owned(), "B".to_owned(), "C".to_owned()])
        );
        // ten distinct floats is still within bounds; eleven ranks is not
        assert!(categorical.contains("importance"));
        assert!(!categorical.contains("rank"));
    }

    #[rstest]
    #[case::constant(vec!["A", "A", "A"], false)]
    #[case::two_values(vec!["A", "B", "A"], true)]
    fn boundary_on_distinct_count(#[case] values: Vec<&str>, #[case] expected: bool) {
        let nodes: Vec<Attributes> = values
            .iter()
            .map(|v| node(&[("group", AttrValue::from(*v))]))
            .collect();
        assert_eq!(classify(&nodes).contains("group"), expected);
    }

    #[rstest]
    fn reserved_keys_never_qualify() {
        let nodes: Vec<Attributes> = (0..3_i64)
            .map(|i| {
                RESERVED_KEYS
                    .iter()
                    .map(|key| ((*key).to_owned(), AttrValue::Int(i)))
                    .collect()
            })
            .collect();
        assert!(classify(&nodes).is_empty());
    }

    #[rstest]
    fn string_coercion_merges_equal_renderings() {
        let nodes = vec![
            node(&[("flag", AttrValue::Int(1))]),
            node(&[("flag", AttrValue::from("1"))]),
        ];
        assert!(!classify(&nodes).contains("flag"));
    }

    #[rstest]
    fn empty_input_yields_nothing() {
        assert!(classify(&Vec::<Attributes>::new()).is_empty());
    }

    fn arbitrary_node() -> impl Strategy<Value = Attributes> {
        let key = prop::sample::select(vec![
            "id", "label", "size", "x", "kind", "group", "score", "flag",
        ]);
        let value = prop_oneof![
            any::<bool>().prop_map(AttrValue::Bool),
            (0_i64..15).prop_map(AttrValue::Int),
            "[a-d]".prop_map(AttrValue::Text),
        ];
        prop::collection::btree_map(key.prop_map(str::to_owned), value, 0..6)
    }

    proptest! {
        #[test]
        fn classification_respects_bounds(
            nodes in prop::collection::vec(arbitrary_node(), 0..30),
        ) {
            let categorical = classify(&nodes);
            for (name, values) in categorical.iter() {
                prop_assert!(!is_reserved(name));
                prop_assert!(values.len() >= MIN_DISTINCT_VALUES);
                prop_assert!(values.len() <= MAX_DISTINCT_VALUES);
            }
        }
    }
}
