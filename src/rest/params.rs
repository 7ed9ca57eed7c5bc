//! Query parameters and per-call options.
//!
//! Parameter structs serialize through `serde` into a flat query map:
//! arrays are comma-joined and `None` fields are skipped.
//!
//! # Example
//!
//! ```rust
//! use jira_api::rest::{FindOptions, Parent};
//!
//! let options = FindOptions::new()
//!     .bind("issue", Parent::key("SAMPLE-1"))
//!     .expand(["renderedBody"]);
//!
//! assert!(options.bindings.get("issue").is_some());
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::rest::relationships::{Bindings, Parent};

/// Query parameters for fetching a single resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FindParams {
    /// Entities to expand (e.g. `renderedFields`, `changelog`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<Vec<String>>,
    /// Fields to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    /// Any other parameter the endpoint understands.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// Query parameters for listing a collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Entities to expand on every member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<Vec<String>>,
    /// Fields to return for every member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    /// Index of the first member to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    /// Any other parameter the endpoint understands.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// Options for [`Resource::find`](crate::rest::Resource::find).
#[derive(Clone, Debug, Default)]
pub struct FindOptions {
    /// Parent bindings for types scoped under another resource.
    pub bindings: Bindings,
    /// Query parameters for the fetch.
    pub params: FindParams,
}

impl FindOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a parent.
    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, parent: impl Into<Parent>) -> Self {
        self.bindings = self.bindings.with(name, parent);
        self
    }

    /// Sets the `expand` parameter.
    #[must_use]
    pub fn expand<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.expand = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the `fields` parameter.
    #[must_use]
    pub fn fields<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.fields = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// Options for [`Resource::all`](crate::rest::Resource::all).
#[derive(Clone, Debug, Default)]
pub struct ListOptions {
    /// Parent bindings for types scoped under another resource.
    pub bindings: Bindings,
    /// Query parameters for the listing.
    pub params: ListParams,
}

impl ListOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a parent.
    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, parent: impl Into<Parent>) -> Self {
        self.bindings = self.bindings.with(name, parent);
        self
    }

    /// Sets the `expand` parameter.
    #[must_use]
    pub fn expand<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.expand = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets `startAt` and `maxResults`.
    #[must_use]
    pub const fn page(mut self, start_at: u32, max_results: u32) -> Self {
        self.params.start_at = Some(start_at);
        self.params.max_results = Some(max_results);
        self
    }
}

/// Serializes a params struct to a query parameter map.
///
/// # Errors
///
/// Returns the serializer error if `params` cannot be represented as JSON.
pub fn serialize_to_query<T: Serialize>(
    params: &T,
) -> Result<BTreeMap<String, String>, serde_json::Error> {
    let mut query = BTreeMap::new();

    if let Value::Object(map) = serde_json::to_value(params)? {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}
