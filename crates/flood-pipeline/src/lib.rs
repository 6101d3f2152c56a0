//! Flood raster classification, masking, alignment, and compositing.
//!
//! This crate is the core of flood-composer. It turns a classified
//! flood-extent raster into the binary form a hydraulic model expects,
//! builds or imports a permanent-water mask, aligns that mask onto the
//! model's output grid, and composites model outputs into a single
//! visualization-ready raster.
//!
//! # Pipeline
//!
//! ```text
//! flood map file
//!      │
//!      ▼
//! accessor::open_flood_map ── grid + bbox
//!      │
//!      ▼
//! classifier::classify_flood_map ── NoWater | converted grid (+ mask)
//!      │
//!      ├─► mask::generate_external_mask (two-state removal only)
//!      │        │
//!      │        ▼
//!      │   align::align_mask onto the model output grid
//!      ▼
//! composite::composite ── sentinel / raw value / NaN per cell
//!      │
//!      ▼
//! writer::save_composite ── F32 grid, deflate, no-data + stats tags
//! ```
//!
//! Everything is synchronous and single-threaded; remote work (land-cover
//! extraction, the hydraulic model itself) goes through the blocking
//! [`platform::JobRunner`] seam.

pub mod accessor;
pub mod align;
pub mod cases;
pub mod classifier;
pub mod composite;
pub mod error;
pub mod mask;
pub mod writer;

pub use accessor::{open_flood_map, FloodMapInfo};
pub use align::{align_mask, align_nearest};
pub use cases::PipelineCase;
pub use classifier::{
    classify_flood_map, ClassificationOutcome, ClassificationScheme, CONVERTED_SUFFIX,
};
pub use composite::{composite, FloodExtent};
pub use error::{PipelineError, Result};
pub use mask::{generate_external_mask, load_aligned_mask, LAND_COVER_WATER_CODE};
pub use writer::save_composite;
