//! Upstream Hacker News API boundary: wire models, the source trait, and
//! the production HTTP client.

pub mod client;
pub mod models;
pub mod source;

pub use client::HnClient;
pub use models::{Story, StoryId, StoryView};
pub use source::StorySource;
