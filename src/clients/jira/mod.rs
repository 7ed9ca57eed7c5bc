//! The Jira client: configuration, transport and side cache in one handle.

mod cache;
mod client;
mod factory;

pub use cache::{CacheKey, ClientCache};
pub use client::JiraClient;
pub use factory::ResourceFactory;
