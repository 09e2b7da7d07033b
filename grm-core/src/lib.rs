//! # Core models for grm
//!
//! Shared value types used by the read extraction and graph crates:
//!
//! - [`Region`]: a genomic interval on a named contig, with flank extension and the
//!   inclusive overlap test used during read extraction.
//! - [`Read`]: a single aligned read, carrying just enough of the alignment record to pair
//!   it with its mate.
//! - [`ExtractionConfig`]: tunables for read extraction, loadable from TOML.
//!
pub mod config;
pub mod errors;
pub mod models;
pub mod utils;

// re-export for cleaner imports
pub use self::config::ExtractionConfig;
pub use self::errors::{CoreError, Result};
pub use self::models::{MateSide, Read, Region};
