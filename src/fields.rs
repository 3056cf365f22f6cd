//! Loosely-typed raw content and field-level coalescing.
//!
//! CMS authors are untrusted input: a key may be missing, blank, or hold a
//! value of the wrong type. Parsing stops at [`RawFields`], a thin wrapper
//! around a YAML mapping. Assemblers then pull each field out through the
//! accessors below, which only ever return a value when it is present *and*
//! plausibly typed. Everything else is `None`, and the assembler substitutes
//! its inline default.
//!
//! Every accessor takes a list of keys and returns the first usable hit, so
//! camelCase CMS keys and snake_case aliases can be accepted side by side:
//!
//! ```text
//! raw.text(&["publishDate", "publish_date", "date"])
//! ```

use chrono::{DateTime, NaiveDate};
use serde_yaml::{Mapping, Value};

/// Return the first non-blank value, trimmed.
///
/// The core merge operation behind every string default: sources are listed
/// in priority order and the first one with content wins.
pub fn first_non_empty(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Parsed-but-unvalidated key/value data from one content file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields(Mapping);

impl RawFields {
    pub fn new(mapping: Mapping) -> Self {
        Self(mapping)
    }

    /// Interpret a parsed YAML document. Only mappings (and an empty
    /// document) are acceptable at the top level.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Mapping(m) => Some(Self(m)),
            Value::Null => Some(Self::default()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn lookup(&self, keys: &[&str]) -> impl Iterator<Item = &Value> {
        keys.iter().filter_map(|key| self.0.get(*key))
    }

    /// First non-blank string (numbers and bools are stringified).
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        self.lookup(keys).find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
    }

    /// [`text`](Self::text) with a literal default.
    pub fn text_or(&self, keys: &[&str], default: &str) -> String {
        self.text(keys).unwrap_or_else(|| default.to_string())
    }

    /// Non-negative integer, from a YAML number or a numeric string.
    pub fn uint(&self, keys: &[&str]) -> Option<u32> {
        self.lookup(keys).find_map(|v| match v {
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Boolean, from a YAML bool or a `"true"`/`"false"` string.
    pub fn flag(&self, keys: &[&str]) -> Option<bool> {
        self.lookup(keys).find_map(|v| match v {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }

    /// List of non-blank strings. A sequence keeps only its string items;
    /// a single string is split on commas. Missing means empty.
    pub fn string_list(&self, keys: &[&str]) -> Vec<String> {
        self.lookup(keys)
            .find_map(|v| match v {
                Value::Sequence(items) => Some(
                    items
                        .iter()
                        .filter_map(|item| match item {
                            Value::String(s) => Some(s.trim().to_string()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .filter(|s| !s.is_empty())
                        .collect(),
                ),
                Value::String(s) => Some(
                    s.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect(),
                ),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Calendar date from `YYYY-MM-DD` or a full RFC 3339 timestamp.
    pub fn date(&self, keys: &[&str]) -> Option<NaiveDate> {
        self.lookup(keys).find_map(|v| match v {
            Value::String(s) => parse_date(s.trim()),
            _ => None,
        })
    }

    /// Nested mapping. Present-but-not-a-mapping counts as absent.
    pub fn object(&self, keys: &[&str]) -> Option<RawFields> {
        self.lookup(keys).find_map(|v| match v {
            Value::Mapping(m) => Some(RawFields(m.clone())),
            _ => None,
        })
    }

    /// Sequence of mappings. `None` when the key is absent or not a
    /// sequence; non-mapping items are dropped.
    pub fn objects(&self, keys: &[&str]) -> Option<Vec<RawFields>> {
        self.lookup(keys).find_map(|v| match v {
            Value::Sequence(items) => Some(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Mapping(m) => Some(RawFields(m.clone())),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        })
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(yaml: &str) -> RawFields {
        RawFields::from_value(serde_yaml::from_str(yaml).unwrap()).unwrap()
    }

    // =========================================================================
    // first_non_empty()
    // =========================================================================

    #[test]
    fn first_non_empty_skips_blank_sources() {
        assert_eq!(
            first_non_empty(&[None, Some("  "), Some(" Title "), Some("later")]),
            Some("Title".to_string())
        );
    }

    #[test]
    fn first_non_empty_all_blank() {
        assert_eq!(first_non_empty(&[None, Some("")]), None);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[test]
    fn text_trims_and_rejects_blank() {
        let r = raw("title: '  Web Development '\nexcerpt: ''\n");
        assert_eq!(r.text(&["title"]).as_deref(), Some("Web Development"));
        assert_eq!(r.text(&["excerpt"]), None);
        assert_eq!(r.text_or(&["excerpt"], "placeholder"), "placeholder");
    }

    #[test]
    fn text_stringifies_scalars() {
        let r = raw("value: 150\nflag: true\n");
        assert_eq!(r.text(&["value"]).as_deref(), Some("150"));
        assert_eq!(r.text(&["flag"]).as_deref(), Some("true"));
    }

    #[test]
    fn text_uses_first_usable_alias() {
        let r = raw("publishDate: ''\npublish_date: '2024-03-01'\n");
        assert_eq!(
            r.text(&["publishDate", "publish_date"]).as_deref(),
            Some("2024-03-01")
        );
    }

    #[test]
    fn uint_accepts_numbers_and_numeric_strings() {
        assert_eq!(raw("order: 3").uint(&["order"]), Some(3));
        assert_eq!(raw("order: '12'").uint(&["order"]), Some(12));
        assert_eq!(raw("order: -1").uint(&["order"]), None);
        assert_eq!(raw("order: first").uint(&["order"]), None);
    }

    #[test]
    fn flag_accepts_bools_and_strings() {
        assert_eq!(raw("featured: true").flag(&["featured"]), Some(true));
        assert_eq!(raw("featured: 'no'").flag(&["featured"]), Some(false));
        assert_eq!(raw("featured: 1").flag(&["featured"]), None);
    }

    #[test]
    fn string_list_from_sequence_and_csv() {
        let r = raw("tags: [rust, '', 42, {a: b}]\ntech: 'Rust, Go ,'\n");
        assert_eq!(r.string_list(&["tags"]), vec!["rust", "42"]);
        assert_eq!(r.string_list(&["tech"]), vec!["Rust", "Go"]);
        assert!(r.string_list(&["missing"]).is_empty());
    }

    #[test]
    fn date_parses_plain_and_rfc3339() {
        let r = raw("a: 2024-01-15\nb: '2024-02-01T10:00:00Z'\nc: soon\n");
        assert_eq!(r.date(&["a"]), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(r.date(&["b"]), NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(r.date(&["c"]), None);
    }

    #[test]
    fn object_requires_mapping() {
        let r = raw("storytelling:\n  hook: Hi\nother: text\n");
        assert_eq!(
            r.object(&["storytelling"]).unwrap().text(&["hook"]).as_deref(),
            Some("Hi")
        );
        assert_eq!(r.object(&["other"]), None);
    }

    #[test]
    fn objects_distinguishes_missing_from_empty() {
        let r = raw("statistics: []\n");
        assert_eq!(r.objects(&["statistics"]), Some(vec![]));
        assert_eq!(r.objects(&["missing"]), None);
    }

    #[test]
    fn from_value_rejects_non_mappings() {
        assert!(RawFields::from_value(serde_yaml::from_str("- a\n- b").unwrap()).is_none());
        assert!(RawFields::from_value(Value::Null).unwrap().is_empty());
    }
}
