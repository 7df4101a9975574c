//! Command-line front end for skill discovery and scaffolding
//!
//! Hosts the pieces shared by the `find-skill` and `make-skill` binaries:
//! argument parsing, layered configuration, token lookup, rendering and the
//! search service.

pub mod args;
pub mod config;
pub mod credentials;
pub mod render;
pub mod service;

pub use args::{FindArgs, MakeArgs};
pub use config::{load_config, ConfigLocations};
pub use credentials::resolve_token;
pub use service::{OutputMode, SearchService};
