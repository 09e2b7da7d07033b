//! Indexed BAM access through noodles.
//!
//! You must provide a `.bai` (or `.csi`) file alongside the bam file! Create one:
//! `samtools index your_file.bam`
use std::fs::File;
use std::path::{Path, PathBuf};

use noodles::bam;
use noodles::bgzf::Reader;
use noodles::sam;

use grm_core::{Read, Region};

use crate::error::{ReadsError, Result};
use crate::record::{contig_names, is_aligned_mate, mate_region, query_interval, record_to_read};
use crate::source::{ReadIter, ReadSource};

///
/// A [`ReadSource`] over a coordinate-sorted, indexed BAM file.
///
/// Unmapped, secondary, supplementary, QC-failed and duplicate records are skipped.
///
pub struct BamReadSource {
    path: PathBuf,
    reader: bam::io::IndexedReader<Reader<File>>,
    header: sam::Header,
    contigs: Vec<String>,
}

impl BamReadSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = bam::io::indexed_reader::Builder::default()
            .build_from_path(path)
            .map_err(|source| ReadsError::Open {
                path: path.display().to_string(),
                source,
            })?;
        let header = reader.read_header().map_err(ReadsError::Header)?;
        let contigs = contig_names(&header);

        Ok(BamReadSource {
            path: path.to_path_buf(),
            reader,
            header,
            contigs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Contig names in header order; a read's `chrom_id` indexes this list.
    pub fn contigs(&self) -> &[String] {
        &self.contigs
    }
}

impl ReadSource for BamReadSource {
    fn query(&mut self, region: &Region) -> Result<ReadIter<'_>> {
        if !self.contigs.iter().any(|contig| *contig == region.chr) {
            return Err(ReadsError::UnknownContig(region.chr.clone()));
        }
        let query_region = noodles::core::Region::new(region.chr.clone(), query_interval(region)?);

        let header = &self.header;
        let records = self
            .reader
            .query(header, &query_region)
            .map_err(|source| ReadsError::Query {
                region: region.to_string(),
                source,
            })?;

        Ok(Box::new(records.filter_map(move |result| {
            result
                .and_then(|record| record_to_read(&record, header))
                .map_err(ReadsError::from)
                .transpose()
        })))
    }

    fn aligned_mate(&mut self, anchor: &Read) -> Result<Option<Read>> {
        let Some(region) = mate_region(anchor, &self.contigs) else {
            return Ok(None);
        };

        for read in self.query(&region)? {
            let read = read?;
            if is_aligned_mate(&read, anchor) {
                return Ok(Some(read));
            }
        }
        Ok(None)
    }
}
