//! Language-aware news aggregation pipeline.
//!
//! Given a remote content repository organized by language, this crate
//! discovers the available languages, resolves the caller's locale preference
//! against them (falling back to a configured default), fetches the resolved
//! language's content files concurrently, and converts each one from markdown
//! into rendered HTML plus front-matter metadata.
//!
//! The web request/response cycle, templating and process bootstrap live
//! outside this crate; callers construct one [`news::NewsService`] per
//! external request and discard it afterwards.

pub mod config;
pub mod error;
pub mod i18n;
pub mod manifest;
pub mod markdown;
pub mod news;
pub mod repository;

pub use config::{Config, RuntimeContext};
pub use error::FetchError;
pub use news::{NewsItem, NewsService};
