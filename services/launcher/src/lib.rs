//! Flood composer launcher.
//!
//! Orchestrates one flood-mapping pipeline run: classify the input flood
//! map, provision a permanent-water mask, delegate DEM extraction and the
//! hydraulic model to remote processors, composite the outputs, and clean
//! up intermediates. The binary in `main.rs` wires the pieces to a local
//! workspace catalog and a job runner.

pub mod config;
pub mod payload;
pub mod run;

pub use config::{base_name, RunParameters};
pub use payload::{RunPayload, RunRecords};
pub use run::{execute_run, RunOutcome, DEM_PROCESSOR, MODEL_PROCESSOR};
