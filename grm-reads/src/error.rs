use std::io;
use thiserror::Error;

use grm_core::CoreError;

/// Error type for read extraction.
#[derive(Error, Debug)]
pub enum ReadsError {
    /// The alignment file or its index could not be opened.
    #[error("Failed to open alignment file {path}: {source}")]
    Open { path: String, source: io::Error },

    /// The reference FASTA (or its `.fai` index) needed to decode CRAM could not be opened.
    #[error("Failed to open reference sequences {path}: {source}")]
    Reference { path: String, source: io::Error },

    /// The alignment header could not be parsed.
    #[error("Failed to read alignment header: {0}")]
    Header(io::Error),

    /// A region names a contig the alignment header does not know.
    #[error("Contig '{0}' is not present in the alignment header")]
    UnknownContig(String),

    /// The reader could not be positioned on a region.
    #[error("Failed to query region {region}: {source}")]
    Query { region: String, source: io::Error },

    /// A region whose coordinates cannot be expressed as a query.
    #[error("Invalid query region: {0}")]
    InvalidRegion(String),

    /// Could not build the worker pool for parallel extraction.
    #[error("Failed to build extraction thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type alias for read extraction.
pub type Result<T> = std::result::Result<T, ReadsError>;
