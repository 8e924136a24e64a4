//! Tag maps attached to every record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tag name to tag value mapping.
///
/// Backed by a `BTreeMap` so tags always serialize in key order, which keeps
/// emitted lines stable for consumers that diff or hash them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `defaults` with the tags supplied at a call site.
    ///
    /// Every key of both maps is present in the result. When a key appears in
    /// both, the call-site value wins. `None` is treated as an empty map.
    /// Neither input is modified; the result is a fresh map.
    pub fn merged(defaults: &Tags, call_site: Option<&Tags>) -> Tags {
        let mut merged = defaults.clone();
        if let Some(call_site) = call_site {
            merged.overlay(call_site);
        }
        merged
    }

    /// Copy every tag of `other` into `self`, replacing existing values.
    pub fn overlay(&mut self, other: &Tags) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for Tags {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self(value)
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Tags
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Tags
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn defaults() -> Tags {
        Tags::from([("globalTag", "globalValue"), ("env", "prod")])
    }

    #[test]
    fn merged_keeps_defaults_and_call_site_tags() {
        let call_site = Tags::from([("tag", "tag value")]);

        let merged = Tags::merged(&defaults(), Some(&call_site));

        assert_eq!(
            merged,
            Tags::from([("globalTag", "globalValue"), ("env", "prod"), ("tag", "tag value")])
        );
    }

    #[test]
    fn call_site_value_wins_on_collision() {
        let call_site = Tags::from([("env", "staging")]);

        let merged = Tags::merged(&defaults(), Some(&call_site));

        assert_eq!(merged.get("env"), Some("staging"));
        assert_eq!(merged.get("globalTag"), Some("globalValue"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn missing_call_site_tags_yield_defaults() {
        assert_eq!(Tags::merged(&defaults(), None), defaults());
        assert_eq!(Tags::merged(&defaults(), Some(&Tags::new())), defaults());
    }

    #[test]
    fn merging_leaves_inputs_untouched() {
        let defaults = defaults();
        let call_site = Tags::from([("env", "staging"), ("tag", "tag value")]);

        let _ = Tags::merged(&defaults, Some(&call_site));

        assert_eq!(defaults, self::defaults());
        assert_eq!(call_site, Tags::from([("env", "staging"), ("tag", "tag value")]));
    }

    #[test]
    fn serializes_as_sorted_json_object() {
        let tags = Tags::from([("b", "2"), ("a", "1")]);

        assert_eq!(serde_json::to_string(&tags).unwrap(), r#"{"a":"1","b":"2"}"#);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the merge holds every key of both maps and call-site
        /// values take precedence.
        #[test]
        fn merge_is_union_with_call_site_precedence(
            defaults in prop::collection::btree_map("[a-z]{1,6}", "[ -~]{0,12}", 0..8),
            call_site in prop::collection::btree_map("[a-z]{1,6}", "[ -~]{0,12}", 0..8),
        ) {
            let d = Tags::from(defaults.clone());
            let t = Tags::from(call_site.clone());

            let merged = Tags::merged(&d, Some(&t));

            for (k, v) in &call_site {
                prop_assert_eq!(merged.get(k), Some(v.as_str()));
            }
            for (k, v) in &defaults {
                if !call_site.contains_key(k) {
                    prop_assert_eq!(merged.get(k), Some(v.as_str()));
                }
            }
            prop_assert!(merged.iter().all(|(k, _)| defaults.contains_key(k) || call_site.contains_key(k)));
        }

        /// Property: merging with no call-site tags is the identity on defaults.
        #[test]
        fn merge_with_empty_call_site_is_identity(
            defaults in prop::collection::btree_map("[a-z]{1,6}", "[ -~]{0,12}", 0..8),
        ) {
            let d = Tags::from(defaults);

            prop_assert_eq!(Tags::merged(&d, None), d.clone());
            prop_assert_eq!(Tags::merged(&d, Some(&Tags::new())), d);
        }
    }
}
