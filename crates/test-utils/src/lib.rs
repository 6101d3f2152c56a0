//! Shared test utilities for the flood-composer workspace.
//!
//! This crate provides common testing infrastructure:
//! - Classification and model-output grid generators
//! - A temp-directory workspace fixture with a live file catalog
//! - A scripted job runner that plays the remote collaborators
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod scripted;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use scripted::*;
