//! Skillfind Discovery
//!
//! Runs a query against every skill source and merges the answers into one
//! ranked list. Local skills always rank above remote ones; duplicates are
//! resolved by name in favour of the higher-priority source.

#![deny(unsafe_code, missing_docs)]

pub mod engine;
pub mod merge;

pub use engine::{DiscoverOptions, DiscoveryEngine, DiscoveryReport, DEFAULT_LIMIT};
pub use merge::merge_ranked;
