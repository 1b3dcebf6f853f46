//! Path and query parameter containers

use std::collections::HashMap;
use url::form_urlencoded;

/// Captured path parameters in left-to-right pattern order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    pairs: Vec<(String, String)>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a parameter by placeholder name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parameter by position in the pattern
    pub fn nth(&self, index: usize) -> Option<&str> {
        self.pairs.get(index).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Values only, in pattern order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(String, String)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// Flat query-string mapping; the last occurrence of a repeated key wins
pub type QueryParams = HashMap<String, String>;

/// Parse a raw query string (without the leading `?`)
pub fn parse_query(query: Option<&str>) -> QueryParams {
    query
        .map(|q| {
            form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_params_lookup() {
        let params: PathParams = vec![
            ("album".to_string(), "paris".to_string()),
            ("photo".to_string(), "7".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(params.get("album"), Some("paris"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.nth(1), Some("7"));
        assert_eq!(params.len(), 2);
        assert!(!params.is_empty());
        assert!(PathParams::new().is_empty());
    }

    #[test]
    fn test_parse_query() {
        let q = parse_query(Some("page=2&sort=date&q=summer+trip%21"));
        assert_eq!(q.get("page").map(String::as_str), Some("2"));
        assert_eq!(q.get("sort").map(String::as_str), Some("date"));
        assert_eq!(q.get("q").map(String::as_str), Some("summer trip!"));
    }

    #[test]
    fn test_parse_query_last_wins() {
        let q = parse_query(Some("tag=a&tag=b"));
        assert_eq!(q.len(), 1);
        assert_eq!(q.get("tag").map(String::as_str), Some("b"));
    }

    #[test]
    fn test_parse_query_empty() {
        assert!(parse_query(None).is_empty());
        assert!(parse_query(Some("")).is_empty());
        let q = parse_query(Some("flag"));
        assert_eq!(q.get("flag").map(String::as_str), Some(""));
    }
}
