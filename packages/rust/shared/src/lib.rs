//! Shared types, error model, and configuration for filmdex.
//!
//! This crate is the foundation depended on by all other filmdex crates.
//! It provides:
//! - [`FilmdexError`] — the unified error type
//! - Record types ([`Record`], [`FieldValue`], [`Person`], [`Work`], [`PageResult`])
//! - The canonicalization collaborator ([`Canonicalizer`], [`DefaultCanonicalizer`])
//! - Configuration ([`AppConfig`], [`AccessConfig`], config loading)

pub mod canon;
pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use canon::{Canonicalizer, DefaultCanonicalizer};
pub use config::{
    AccessConfig, AccessSection, AppConfig, SearchSection, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{FilmdexError, RecordKind, Result};
pub use types::{FieldValue, InfoSet, PageResult, Person, Record, SearchHit, Work};
