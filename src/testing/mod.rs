//! Test doubles for exercising the retrieval engine without the network.

pub mod mock_source;

pub use mock_source::MockStorySource;
