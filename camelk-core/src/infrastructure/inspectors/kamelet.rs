//! Kamelet reference extraction

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::Metadata;

/// Query parameter pinning a Kamelet version
pub const KAMELET_VERSION_PROPERTY: &str = "kameletVersion";

static KAMELET_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"kamelet:(?://)?([a-z0-9.-]+(/[a-z0-9.-]+)?)(?:$|[^a-z0-9.-].*)")
        .expect("valid kamelet name regex")
});

static KAMELET_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"kameletVersion=([a-z0-9.-]+)").expect("valid kamelet version regex")
});

/// Extract `name` or `name/id` from a `kamelet:` URI.
///
/// A `kameletVersion` query parameter is kept as `?kameletVersion=<v>` so
/// versioned references stay distinct; every other parameter is dropped.
pub fn extract_kamelet(uri: &str) -> Option<String> {
    let name = KAMELET_NAME.captures(uri)?.get(1)?.as_str();

    match KAMELET_VERSION
        .captures(uri)
        .and_then(|captures| captures.get(1))
    {
        Some(version) => Some(format!(
            "{name}?{KAMELET_VERSION_PROPERTY}={}",
            version.as_str()
        )),
        None => Some(name.to_string()),
    }
}

/// Register the Kamelet behind a `kamelet:` URI, ignoring any other URI
pub fn add_kamelet(meta: &mut Metadata, uri: &str) {
    if !uri.starts_with("kamelet:") {
        return;
    }
    if let Some(kamelet) = extract_kamelet(uri) {
        meta.add_kamelet(kamelet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_kamelet() {
        assert_eq!(extract_kamelet("kamelet:foo/bar?baz=test").as_deref(), Some("foo/bar"));
        assert_eq!(extract_kamelet("kamelet:foo").as_deref(), Some("foo"));
        assert_eq!(extract_kamelet("kamelet://foo/bar").as_deref(), Some("foo/bar"));
        assert_eq!(extract_kamelet("fail"), None);
    }

    #[test]
    fn test_extract_kamelet_keeps_version() {
        assert_eq!(
            extract_kamelet("kamelet:my-test?option=1&kameletVersion=v1").as_deref(),
            Some("my-test?kameletVersion=v1")
        );
    }

    #[test]
    fn test_add_kamelet_requires_scheme() {
        let mut meta = Metadata::default();
        add_kamelet(&mut meta, "timer:kamelet:foo");
        assert!(meta.kamelets.is_empty());

        add_kamelet(&mut meta, "kamelet:source");
        add_kamelet(&mut meta, "kamelet:source");
        assert_eq!(meta.kamelets, vec!["source"]);
    }
}
