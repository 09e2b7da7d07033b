use std::fmt;
use std::fs::File;
use std::io::Read as _;
use std::path::Path;

use log::debug;

use grm_core::{Read, Region};

use crate::bam::BamReadSource;
use crate::cram::CramReadSource;
use crate::error::Result;
use crate::source::{ReadIter, ReadSource};

const CRAM_MAGIC: &[u8; 4] = b"CRAM";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    Bam,
    Cram,
}

impl AlignmentFormat {
    ///
    /// Format of an alignment file, judged by its leading bytes.
    ///
    /// Files that cannot be read fall back to the extension: `.cram` is CRAM, anything else
    /// is taken for BAM.
    ///
    pub fn detect(path: &Path) -> AlignmentFormat {
        let mut magic = [0u8; 4];
        if let Ok(mut file) = File::open(path) {
            if file.read_exact(&mut magic).is_ok() {
                return if &magic == CRAM_MAGIC {
                    AlignmentFormat::Cram
                } else {
                    AlignmentFormat::Bam
                };
            }
        }

        match path.extension() {
            Some(extension) if extension.eq_ignore_ascii_case("cram") => AlignmentFormat::Cram,
            _ => AlignmentFormat::Bam,
        }
    }
}

impl fmt::Display for AlignmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentFormat::Bam => write!(f, "BAM"),
            AlignmentFormat::Cram => write!(f, "CRAM"),
        }
    }
}

///
/// An indexed BAM or CRAM file, opened according to its detected format.
///
pub enum AlignmentReadSource {
    Bam(BamReadSource),
    Cram(CramReadSource),
}

impl AlignmentReadSource {
    ///
    /// Open an alignment file.
    ///
    /// `reference` is the indexed FASTA used to decode CRAM; BAM input does not need it.
    ///
    pub fn open<P: AsRef<Path>>(path: P, reference: Option<&Path>) -> Result<Self> {
        let path = path.as_ref();
        match AlignmentFormat::detect(path) {
            AlignmentFormat::Bam => {
                if let Some(reference) = reference {
                    debug!(
                        "BAM input {} does not use reference {}",
                        path.display(),
                        reference.display()
                    );
                }
                Ok(AlignmentReadSource::Bam(BamReadSource::open(path)?))
            }
            AlignmentFormat::Cram => {
                Ok(AlignmentReadSource::Cram(CramReadSource::open(path, reference)?))
            }
        }
    }

    pub fn format(&self) -> AlignmentFormat {
        match self {
            AlignmentReadSource::Bam(_) => AlignmentFormat::Bam,
            AlignmentReadSource::Cram(_) => AlignmentFormat::Cram,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            AlignmentReadSource::Bam(source) => source.path(),
            AlignmentReadSource::Cram(source) => source.path(),
        }
    }

    /// Contig names in header order; a read's `chrom_id` indexes this list.
    pub fn contigs(&self) -> &[String] {
        match self {
            AlignmentReadSource::Bam(source) => source.contigs(),
            AlignmentReadSource::Cram(source) => source.contigs(),
        }
    }
}

impl ReadSource for AlignmentReadSource {
    fn query(&mut self, region: &Region) -> Result<ReadIter<'_>> {
        match self {
            AlignmentReadSource::Bam(source) => source.query(region),
            AlignmentReadSource::Cram(source) => source.query(region),
        }
    }

    fn aligned_mate(&mut self, anchor: &Read) -> Result<Option<Read>> {
        match self {
            AlignmentReadSource::Bam(source) => source.aligned_mate(anchor),
            AlignmentReadSource::Cram(source) => source.aligned_mate(anchor),
        }
    }
}
