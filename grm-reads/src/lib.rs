//! Region-scoped paired read extraction.
//!
//! Given target regions and an indexed alignment source, this crate collects the reads that
//! overlap each region (or whose mate does), pairs them up by fragment and, when the region's
//! read budget allows, fetches mates that landed far away.
//!
//! ## Quick Start
//!
//! ```rust
//! use grm_core::{ExtractionConfig, MateSide, Read, Region};
//! use grm_reads::{MemoryReadSource, extract_reads_from_region};
//!
//! // one fragment with a mate 50kb downstream
//! let mut source = MemoryReadSource::new(["chr1"]).with_reads([
//!     Read::new("frag", 0, 1200, "ACGTACGTAC").with_mate(0, 50_000),
//!     Read::new("frag", 0, 50_000, "ACGTACGTAC")
//!         .with_mate(0, 1200)
//!         .with_side(MateSide::Second),
//! ]);
//!
//! let region = Region::new("chr1", 1000, 2000);
//! let extraction =
//!     extract_reads_from_region(&mut source, &region, &ExtractionConfig::default()).unwrap();
//!
//! assert_eq!(extraction.num_original, 1);
//! assert_eq!(extraction.num_recovered, 1);
//! ```
//!
//! For alignment files use [`AlignmentReadSource`], which opens BAM as [`BamReadSource`] and
//! CRAM (with its reference FASTA) as [`CramReadSource`]. [`extract_reads_parallel`] runs many
//! regions on a thread pool with one file handle per worker.

pub mod alignment;
pub mod bam;
pub mod cram;
pub mod error;
pub mod extraction;
pub mod pairs;
pub mod record;
pub mod source;

// re-exports
pub use self::alignment::{AlignmentFormat, AlignmentReadSource};
pub use self::bam::BamReadSource;
pub use self::cram::CramReadSource;
pub use self::error::{ReadsError, Result};
pub use self::extraction::{
    RegionExtraction, extract_mapped_reads_from_region, extract_reads, extract_reads_from_region,
    extract_reads_parallel, is_read_or_its_mate_in_region, recover_missing_mates,
};
pub use self::pairs::{ReadPair, ReadPairs};
pub use self::source::{MemoryReadSource, ReadIter, ReadSource};
