//! Skillfind Skills
//!
//! Everything that touches SKILL.md documents on disk.
//!
//! ## Features
//!
//! - YAML frontmatter parsing and validation (name, description, license,
//!   compatibility, free-form metadata)
//! - Local skill discovery across several directories, including category
//!   folders one level down
//! - Scaffolding new skills from a built-in template

#![deny(unsafe_code, unused_imports, unused_variables, missing_docs)]

pub mod scaffold;
pub mod scanner;
pub mod skill;

pub use scaffold::{create_skill, ScaffoldOptions};
pub use scanner::{expand_tilde, scan_paths, LocalScanner};
pub use skill::{validate_name, SkillDocument, SkillMetadata, SKILL_FILE};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{create_skill, LocalScanner, ScaffoldOptions, SkillDocument};
}
