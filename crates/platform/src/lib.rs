//! Collaborator seams for flood-composer.
//!
//! The pipeline delegates long-running work (land-cover extraction, DEM
//! extraction, hydraulic-model execution) to out-of-process collaborators
//! and resolves file identifiers through a workspace catalog. This crate
//! defines those seams as traits so the core stays testable without any
//! remote infrastructure:
//!
//! - [`JobRunner`]: `execute` / `wait` / `output_payload` against a named
//!   remote processor. Blocking by design; the pipeline is single-threaded
//!   and awaits every job synchronously.
//! - [`FileCatalog`]: register, delete, and resolve named products.
//!   [`LocalCatalog`] is the filesystem-backed implementation.

pub mod catalog;
pub mod error;
pub mod job;

pub use catalog::{FileCatalog, LocalCatalog};
pub use error::{PlatformError, Result};
pub use job::{JobId, JobRunner, JobStatus, OfflineRunner};
