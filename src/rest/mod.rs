//! The generic resource-mapping engine.
//!
//! One implementation, [`Resource<T>`], gives every Jira resource type the
//! same behavior:
//!
//! - **CRUD**: [`Resource::all`], [`Resource::find`], [`Resource::fetch`],
//!   [`Resource::save`] / [`Resource::try_save`], [`Resource::delete`]
//! - **URL derivation**: [`Resource::url`], built from the site, the REST
//!   base path, the belongs-to chain and the key value
//! - **Relationships**: [`Resource::has_one`] and [`Resource::has_many`],
//!   driven by the declarations in [`ResourceSpec`]
//! - **Dynamic attributes**: [`Resource::attr`] / [`Resource::try_attr`] over
//!   the raw JSON tree held in an [`AttributeStore`]
//!
//! Resource types are zero-sized markers (see [`resources`]) that point at a
//! static [`ResourceSpec`]; adding a type is a declaration, not code.
//!
//! # Example
//!
//! ```rust,ignore
//! use jira_api::rest::{FindOptions, Resource};
//! use jira_api::rest::resources::{Comment, Issue};
//! use serde_json::json;
//!
//! let issue = Resource::<Issue>::find(&client, "SAMPLE-1", &FindOptions::new()).await?;
//!
//! let mut comments = issue.comments()?;
//! let draft = comments.build(json!({}))?;
//! if !draft.save(json!({"body": "Reproduced on 9.12"})).await {
//!     eprintln!("{:?}", draft.attr("exception"));
//! }
//! ```

mod attributes;
mod collection;
mod errors;
mod params;
mod path;
mod registry;
mod relationships;
mod resource;
pub mod resources;

pub use attributes::AttributeStore;
pub use collection::CollectionProxy;
pub use errors::ResourceError;
pub use params::{serialize_to_query, FindOptions, FindParams, ListOptions, ListParams};
pub use path::{
    append_query, belongs_to_prefix, collection_path, ensure_leading_slash, is_absolute,
    singular_path, strip_site,
};
pub use registry::{
    infer_target, Cardinality, NestedPath, Relationship, ResourceKind, ResourceSpec, ResourceType,
};
pub use relationships::{Binding, Bindings, Parent};
pub use resource::Resource;
