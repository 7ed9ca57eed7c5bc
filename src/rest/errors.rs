//! Error types for resource operations.
//!
//! [`ResourceError`] wraps the transport failure ([`HttpError`]) and adds the
//! failures the engine itself detects: missing parent bindings, unknown
//! attributes or relationships, and operations on deleted entities.
//!
//! # Example
//!
//! ```rust,ignore
//! use jira_api::rest::ResourceError;
//! use jira_api::rest::resources::Issue;
//!
//! match client.resource::<Issue>().find("SAMPLE-1").await {
//!     Ok(issue) => println!("Found: {}", issue),
//!     Err(e) if e.is_not_found() => println!("No such issue"),
//!     Err(ResourceError::Http(e)) => println!("Transport failure: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The transport failed or the server answered outside `200..=299`.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A resource was constructed without a required parent binding.
    #[error("{resource} requires a '{relation}' binding. Pass the parent resource or its key when building it.")]
    MissingBelongsTo {
        /// The type name of the resource being built.
        resource: &'static str,
        /// The belongs-to relation that was not supplied.
        relation: &'static str,
    },

    /// An attribute lookup found no top-level key of that name.
    #[error("{resource} has no attribute '{name}'")]
    UnknownAttribute {
        /// The type name of the resource.
        resource: &'static str,
        /// The requested attribute name.
        name: String,
    },

    /// A relationship accessor was called with an undeclared name.
    #[error("{resource} declares no relationship named '{name}'")]
    UnknownRelationship {
        /// The type name of the resource.
        resource: &'static str,
        /// The requested relationship name.
        name: String,
    },

    /// A relationship was traversed with the wrong cardinality or target type.
    #[error("Relationship '{name}' on {resource} is declared as {declared}, not {requested}")]
    RelationshipMismatch {
        /// The type name of the owning resource.
        resource: &'static str,
        /// The relationship name.
        name: String,
        /// What the registry declares (e.g. `one-to-many Comment`).
        declared: String,
        /// What the caller asked for.
        requested: String,
    },

    /// A relationship declares no target and none can be inferred from its name.
    #[error("Cannot infer the target resource of relationship '{name}' on {resource}")]
    UnresolvedTarget {
        /// The type name of the owning resource.
        resource: &'static str,
        /// The relationship name.
        name: String,
    },

    /// The entity was deleted and may not be fetched or saved again.
    #[error("{resource} '{key}' has been deleted")]
    Deleted {
        /// The type name of the resource.
        resource: &'static str,
        /// The key value of the deleted entity.
        key: String,
    },

    /// Attributes supplied to a resource were not a JSON object.
    #[error("Attributes for {resource} must be a JSON object, got {found}")]
    InvalidAttributes {
        /// The type name of the resource.
        resource: &'static str,
        /// The JSON type that was supplied instead.
        found: &'static str,
    },

    /// A collection response could not be parsed.
    #[error("Invalid JSON in {resource} response: {source}")]
    InvalidJson {
        /// The type name of the resource.
        resource: &'static str,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A collection response parsed but did not hold a list of objects.
    #[error("Unexpected {resource} collection payload: {detail}")]
    UnexpectedPayload {
        /// The type name of the resource.
        resource: &'static str,
        /// What was found instead.
        detail: String,
    },
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

impl ResourceError {
    /// Returns the HTTP status of a failed response, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the raw body of a failed response, if the server answered.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Http(e) => e.body(),
            _ => None,
        }
    }

    /// Returns `true` if the server answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }

    /// Returns the messages of a Jira error document carried by the response.
    ///
    /// Collects `errorMessages` entries followed by `errors` entries rendered
    /// as `field: message`. Empty when the body is missing or not JSON.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        let Some(json) = self
            .response_body()
            .and_then(|body| serde_json::from_str::<serde_json::Value>(body).ok())
        else {
            return Vec::new();
        };

        let mut messages: Vec<String> = json
            .get("errorMessages")
            .and_then(serde_json::Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(ToString::to_string))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(errors) = json.get("errors").and_then(serde_json::Value::as_object) {
            messages.extend(errors.iter().map(|(field, message)| {
                let text = message
                    .as_str()
                    .map_or_else(|| message.to_string(), ToString::to_string);
                format!("{field}: {text}")
            }));
        }

        messages
    }
}

/// Names the JSON type of a value, for error messages.
pub(crate) const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
