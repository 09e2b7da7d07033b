//! Indexed CRAM access through noodles.
//!
//! A `.crai` file must sit next to the CRAM file (`samtools index your_file.cram`), and the
//! reference FASTA needs a `.fai` (`samtools faidx reference.fa`).
use std::fs::File;
use std::path::{Path, PathBuf};

use noodles::cram;
use noodles::fasta;
use noodles::sam;

use grm_core::{Read, Region};

use crate::error::{ReadsError, Result};
use crate::record::{contig_names, is_aligned_mate, mate_region, query_interval, record_to_read};
use crate::source::{ReadIter, ReadSource};

///
/// A [`ReadSource`] over a coordinate-sorted, indexed CRAM file.
///
/// Bases are restored from the reference sequences, so CRAM files written against a
/// reference need that FASTA to be given. Record filtering is the same as for
/// [`BamReadSource`](crate::BamReadSource).
///
pub struct CramReadSource {
    path: PathBuf,
    reader: cram::io::IndexedReader<File>,
    header: sam::Header,
    contigs: Vec<String>,
}

impl CramReadSource {
    pub fn open<P: AsRef<Path>>(path: P, reference: Option<&Path>) -> Result<Self> {
        let path = path.as_ref();
        let repository = match reference {
            Some(reference) => reference_repository(reference)?,
            None => fasta::Repository::default(),
        };

        let mut reader = cram::io::indexed_reader::Builder::default()
            .set_reference_sequence_repository(repository)
            .build_from_path(path)
            .map_err(|source| ReadsError::Open {
                path: path.display().to_string(),
                source,
            })?;
        let header = reader.read_header().map_err(ReadsError::Header)?;
        let contigs = contig_names(&header);

        Ok(CramReadSource {
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

impl ReadSource for CramReadSource {
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

/// Reference sequences backed by an indexed FASTA file.
pub fn reference_repository(path: &Path) -> Result<fasta::Repository> {
    let reader = fasta::io::indexed_reader::Builder::default()
        .build_from_path(path)
        .map_err(|source| ReadsError::Reference {
            path: path.display().to_string(),
            source,
        })?;
    let adapter = fasta::repository::adapters::IndexedReader::new(reader);
    Ok(fasta::Repository::new(adapter))
}
