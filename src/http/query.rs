//! Query-string parsing.
//!
//! `application/x-www-form-urlencoded` rules: `+` is a space, pairs are
//! percent-decoded, and keys may repeat. Order is preserved so that
//! re-serializing yields the same pair sequence.

use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};
use url::form_urlencoded;

/// Decoded query-string pairs, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw query string, with or without its leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryParams {
    /// Re-encode the pairs in their original order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        f.write_str(&encoded)
    }
}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.pairs.len()))?;
        for pair in &self.pairs {
            seq.serialize_element(pair)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let query = QueryParams::parse("limit=20&offset=2");
        assert_eq!(query.get("limit"), Some("20"));
        assert_eq!(query.get("offset"), Some("2"));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let query = QueryParams::parse("?name=John&age=25");
        assert_eq!(query.to_string(), "name=John&age=25");
        assert_eq!(query.iter().collect::<Vec<_>>(), vec![("name", "John"), ("age", "25")]);
    }

    #[test]
    fn test_decoding_and_repeated_keys() {
        let query = QueryParams::parse("q=hello+world&tag=a&tag=b%20c&flag");
        assert_eq!(query.get("q"), Some("hello world"));
        assert_eq!(query.get_all("tag").collect::<Vec<_>>(), vec!["a", "b c"]);
        assert!(query.contains_key("flag"));
        assert_eq!(query.get("flag"), Some(""));
    }

    #[test]
    fn test_empty() {
        assert!(QueryParams::parse("").is_empty());
        assert_eq!(QueryParams::default().to_string(), "");
    }
}
