// ============================================================
// Layer 3 — Raw Input
// ============================================================
// The flat mapping of field name → raw string value that a
// request carries, regardless of its wire encoding (form or JSON).
//
// It may be missing schema fields and may contain fields the
// schema has never heard of. Neither is an error: the normalizer
// reindexes onto the schema and drops the rest.

use std::collections::HashMap;

/// Field name → raw, untrimmed string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    fields: HashMap<String, String>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any earlier value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut raw = RawFields::new();
        for (k, v) in iter {
            raw.insert(k, v);
        }
        raw
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_value_wins() {
        let raw: RawFields = [("a", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(raw.get("a"), Some("2"));
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn test_missing_field() {
        let raw = RawFields::new();
        assert!(raw.is_empty());
        assert_eq!(raw.get("koi_period"), None);
    }
}
