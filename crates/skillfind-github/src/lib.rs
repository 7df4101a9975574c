//! Skillfind GitHub - remote skill sources
//!
//! Three searchers over the GitHub REST API, ordered by precision:
//!
//! - [`KnownReposSearcher`]: curated repositories, one skill per top-level
//!   folder, filtered like local documents
//! - [`TopicSearcher`]: repositories tagged with the configured topic
//! - [`CodeSearcher`]: SKILL.md files anywhere on GitHub (needs a token)
//!
//! Every searcher turns failures into warnings; none of them can fail a run.

#![deny(unsafe_code, missing_docs)]

pub mod client;
pub mod code_search;
pub mod error;
pub mod fetch;
pub mod known_repos;
pub mod sanitize;
pub mod topic;

pub use client::{GitHubClient, RepoId, GITHUB_API_BASE, GITHUB_RAW_BASE, GITHUB_WEB_BASE};
pub use code_search::CodeSearcher;
pub use error::{GitHubError, Result};
pub use fetch::{fetch_document, raw_document_url};
pub use known_repos::KnownReposSearcher;
pub use sanitize::sanitize_search_terms;
pub use topic::TopicSearcher;
