//! Path pattern compilation
//!
//! Turns `/order/{id}` style paths into anchored regular expressions where each
//! `{name}` placeholder captures one or more non-slash characters.

use regex::Regex;
use std::sync::LazyLock;

use super::params::PathParams;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(\w+)\}").unwrap_or_else(|e| unreachable!("placeholder regex is valid: {e}"))
});

/// A route path compiled into a matcher
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    regex: Regex,
    names: Vec<String>,
}

impl PathPattern {
    /// Compile a route path
    ///
    /// Literal text is matched verbatim; only `{name}` placeholders capture.
    pub fn compile(path: &str) -> Result<Self, regex::Error> {
        let mut source = String::with_capacity(path.len() + 16);
        let mut names = Vec::new();
        let mut last = 0;

        source.push('^');
        for caps in PLACEHOLDER.captures_iter(path) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            source.push_str(&regex::escape(&path[last..whole.start()]));
            source.push_str(&format!("(?P<{}>[^/]+)", name.as_str()));
            names.push(name.as_str().to_string());
            last = whole.end();
        }
        source.push_str(&regex::escape(&path[last..]));
        source.push('$');

        Ok(Self {
            raw: path.to_string(),
            regex: Regex::new(&source)?,
            names,
        })
    }

    /// Match a request path, returning captured parameters in pattern order
    pub fn captures(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;
        let params = self
            .names
            .iter()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (name.clone(), m.as_str().to_string()))
            })
            .collect();
        Some(params)
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The path as registered
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in left-to-right order
    pub fn param_names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_path() {
        let p = PathPattern::compile("/about").unwrap();
        assert!(p.is_match("/about"));
        assert!(!p.is_match("/about/"));
        assert!(!p.is_match("/about/team"));
        assert!(!p.is_match("/aboutus"));
        assert!(p.param_names().is_empty());
    }

    #[test]
    fn test_single_param() {
        let p = PathPattern::compile("/order/{id}").unwrap();
        let params = p.captures("/order/42").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert!(p.captures("/order/42/extra").is_none());
        assert!(p.captures("/order/").is_none());
        assert!(p.captures("/order").is_none());
    }

    #[test]
    fn test_params_keep_pattern_order() {
        let p = PathPattern::compile("/gallery/{year}/{album}/photo/{photo}").unwrap();
        let params = p.captures("/gallery/2019/paris/photo/7").unwrap();
        let names: Vec<_> = params.iter().map(|(k, _)| k).collect();
        let values: Vec<_> = params.values().collect();
        assert_eq!(names, ["year", "album", "photo"]);
        assert_eq!(values, ["2019", "paris", "7"]);
        assert_eq!(p.param_names(), ["year", "album", "photo"]);
    }

    #[test]
    fn test_literal_metacharacters_escaped() {
        let p = PathPattern::compile("/feed.json").unwrap();
        assert!(p.is_match("/feed.json"));
        assert!(!p.is_match("/feedxjson"));

        let p = PathPattern::compile("/search+{term}").unwrap();
        assert_eq!(p.captures("/search+cats").unwrap().get("term"), Some("cats"));
    }

    #[test]
    fn test_param_inside_segment() {
        let p = PathPattern::compile("/photo-{id}.jpg").unwrap();
        assert_eq!(p.captures("/photo-12.jpg").unwrap().get("id"), Some("12"));
        assert!(!p.is_match("/photo-.jpg"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        assert!(PathPattern::compile("/a/{id}/b/{id}").is_err());
    }

    #[test]
    fn test_raw_kept() {
        let p = PathPattern::compile("/product/{id}").unwrap();
        assert_eq!(p.raw(), "/product/{id}");
    }
}
