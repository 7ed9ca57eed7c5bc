//! URL derivation for resources.
//!
//! Every function here is pure: the inputs are the client's rest base path,
//! the resource's endpoint name, the belongs-to prefix and optionally a key.
//!
//! # Example
//!
//! ```rust
//! use jira_api::rest::{belongs_to_prefix, collection_path, singular_path};
//!
//! let prefix = belongs_to_prefix([("issue", "10002")]);
//! assert_eq!(prefix, "/issue/10002/");
//!
//! assert_eq!(
//!     collection_path("/rest/api/2", &prefix, "comment"),
//!     "/rest/api/2/issue/10002/comment"
//! );
//! assert_eq!(
//!     singular_path("/rest/api/2", &prefix, "comment", "1"),
//!     "/rest/api/2/issue/10002/comment/1"
//! );
//! ```

use std::collections::BTreeMap;

/// Builds the URL prefix for a chain of parents.
///
/// Produces `/` followed by `<name>/<key>/` for every parent, in order.
#[must_use]
pub fn belongs_to_prefix<'a, I>(parents: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    parents
        .into_iter()
        .fold(String::from("/"), |mut prefix, (name, key)| {
            prefix.push_str(name);
            prefix.push('/');
            prefix.push_str(key);
            prefix.push('/');
            prefix
        })
}

/// Returns `rest_base_path + prefix + endpoint_name`.
#[must_use]
pub fn collection_path(rest_base_path: &str, prefix: &str, endpoint_name: &str) -> String {
    format!("{rest_base_path}{prefix}{endpoint_name}")
}

/// Returns the collection path followed by `/` and the URL-encoded key.
#[must_use]
pub fn singular_path(rest_base_path: &str, prefix: &str, endpoint_name: &str, key: &str) -> String {
    format!(
        "{}/{}",
        collection_path(rest_base_path, prefix, endpoint_name),
        urlencoding::encode(key)
    )
}

/// Strips `site` from an absolute link and leaves exactly one leading slash.
///
/// Links on another origin are returned unchanged so the transport can
/// follow them as-is.
#[must_use]
pub fn strip_site(site: &str, link: &str) -> String {
    link.strip_prefix(site.trim_end_matches('/'))
        .filter(|rest| rest.is_empty() || rest.starts_with('/'))
        .map_or_else(
            || link.to_string(),
            |rest| format!("/{}", rest.trim_start_matches('/')),
        )
}

/// Returns `true` for `http://` and `https://` URLs.
#[must_use]
pub fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Prepends `/` unless the path already has one or is an absolute URL.
#[must_use]
pub fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') || is_absolute(path) {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Appends URL-encoded query parameters, using `&` when a query already exists.
#[must_use]
pub fn append_query(url: &str, query: &BTreeMap<String, String>) -> String {
    if query.is_empty() {
        return url.to_string();
    }

    let encoded = query
        .iter()
        .map(|(key, value)| {
            format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
        })
        .collect::<Vec<_>>()
        .join("&");
    let separator = if url.contains('?') { '&' } else { '?' };

    format!("{url}{separator}{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_without_parents_is_slash() {
        assert_eq!(belongs_to_prefix(std::iter::empty()), "/");
    }

    #[test]
    fn test_prefix_keeps_declaration_order() {
        assert_eq!(
            belongs_to_prefix([("project", "ABC"), ("version", "7")]),
            "/project/ABC/version/7/"
        );
    }

    #[test]
    fn test_collection_and_singular_paths() {
        assert_eq!(collection_path("/rest/api/2", "/", "issue"), "/rest/api/2/issue");
        assert_eq!(
            singular_path("/jira/rest/api/2", "/", "issue", "SAMPLE-1"),
            "/jira/rest/api/2/issue/SAMPLE-1"
        );
    }

    #[test]
    fn test_singular_path_encodes_key() {
        assert_eq!(
            singular_path("/rest/api/2", "/", "filter", "a b"),
            "/rest/api/2/filter/a%20b"
        );
    }

    #[test]
    fn test_strip_site_leaves_one_slash() {
        assert_eq!(
            strip_site("http://host", "http://host/api/issue/123"),
            "/api/issue/123"
        );
        assert_eq!(
            strip_site("http://host/", "http://host/api/issue/123"),
            "/api/issue/123"
        );
    }

    #[test]
    fn test_strip_site_keeps_foreign_links() {
        assert_eq!(
            strip_site("http://host", "https://other/api/issue/123"),
            "https://other/api/issue/123"
        );
        assert_eq!(
            strip_site("http://host", "http://hostile/api/issue/123"),
            "http://hostile/api/issue/123"
        );
    }

    #[test]
    fn test_ensure_leading_slash() {
        assert_eq!(ensure_leading_slash("rest/api/2/issue/1"), "/rest/api/2/issue/1");
        assert_eq!(ensure_leading_slash("/rest/api/2/issue/1"), "/rest/api/2/issue/1");
        assert_eq!(ensure_leading_slash("https://host/x"), "https://host/x");
    }

    #[test]
    fn test_append_query_encodes_and_sorts() {
        let mut query = BTreeMap::new();
        query.insert("fields".to_string(), "summary,status".to_string());
        query.insert("expand".to_string(), "names".to_string());

        assert_eq!(
            append_query("/rest/api/2/issue/1", &query),
            "/rest/api/2/issue/1?expand=names&fields=summary%2Cstatus"
        );
        assert_eq!(
            append_query("/rest/api/2/user?accountId=abc", &query),
            "/rest/api/2/user?accountId=abc&expand=names&fields=summary%2Cstatus"
        );
        assert_eq!(append_query("/x", &BTreeMap::new()), "/x");
    }
}
