//! Native georeferenced grid codec for flood-composer.
//!
//! Implements the NGRID/1 container: a small single-file format carrying a
//! JSON metadata header (profile, affine geotransform, CRS, descriptive
//! tags) followed by one payload per band, optionally deflate-compressed
//! and protected by a CRC32 of the uncompressed bytes.
//!
//! ```text
//! +--------+------------+-------------+   per band   +-----------+-------+
//! | "NGR1" | u32 hdrlen | JSON header |  ──────────► | u64 len   | CRC32 |
//! +--------+------------+-------------+              | payload   |       |
//!                                                    +-----------+-------+
//! ```
//!
//! Readers read exactly band 1; multi-band files are accepted but only the
//! first band is decoded. This is a documented limitation of the pipeline,
//! not a defect.

pub mod error;
pub mod format;
pub mod reader;
pub mod writer;

pub use error::{CodecError, Result};
pub use format::{FORMAT_MAGIC, FORMAT_VERSION};
pub use reader::Dataset;
pub use writer::{write_grid, GridWriter};
