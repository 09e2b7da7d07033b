use grm_core::{Read, Region};

use crate::error::{ReadsError, Result};

/// Iterator over the reads of one region query.
pub type ReadIter<'a> = Box<dyn Iterator<Item = Result<Read>> + 'a>;

///
/// A positioned source of aligned reads, such as an indexed BAM file.
///
/// Implementations are used by one extraction flow at a time; parallel extraction gives
/// every worker its own source.
///
pub trait ReadSource {
    ///
    /// Iterate the reads overlapping `region`, in coordinate order.
    ///
    /// Failing to position the source on the region is an error; an empty region is not.
    ///
    fn query(&mut self, region: &Region) -> Result<ReadIter<'_>>;

    ///
    /// Fetch the mate of `anchor` from the anchor's mate coordinates.
    ///
    /// Returns `Ok(None)` when nothing matching sits there (unmapped or filtered mate).
    ///
    fn aligned_mate(&mut self, anchor: &Read) -> Result<Option<Read>>;
}

///
/// A [`ReadSource`] over reads held in memory.
///
/// Contigs are identified by their index in the contig list, like the reference sequence
/// ids of an alignment header. Mate fetches are counted so callers can check how much
/// random access an extraction would have cost.
///
#[derive(Debug, Default, Clone)]
pub struct MemoryReadSource {
    contigs: Vec<String>,
    reads: Vec<Read>,
    mate_fetches: usize,
}

impl MemoryReadSource {
    pub fn new<I, S>(contigs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryReadSource {
            contigs: contigs.into_iter().map(Into::into).collect(),
            reads: Vec::new(),
            mate_fetches: 0,
        }
    }

    pub fn with_reads(mut self, reads: impl IntoIterator<Item = Read>) -> Self {
        self.reads.extend(reads);
        self.reads.sort_by_key(|read| (read.chrom_id, read.pos));
        self
    }

    pub fn contig_id(&self, name: &str) -> Option<usize> {
        self.contigs.iter().position(|contig| contig == name)
    }

    /// Number of [`ReadSource::aligned_mate`] calls made so far.
    pub fn mate_fetches(&self) -> usize {
        self.mate_fetches
    }
}

impl ReadSource for MemoryReadSource {
    fn query(&mut self, region: &Region) -> Result<ReadIter<'_>> {
        let chrom_id = self
            .contig_id(&region.chr)
            .ok_or_else(|| ReadsError::UnknownContig(region.chr.clone()))?;
        let start = i64::from(region.start);
        let end = i64::from(region.end);

        Ok(Box::new(
            self.reads
                .iter()
                .filter(move |read| {
                    read.chrom_id == Some(chrom_id) && read.pos < end && read.pos + read.len() > start
                })
                .cloned()
                .map(Ok),
        ))
    }

    fn aligned_mate(&mut self, anchor: &Read) -> Result<Option<Read>> {
        self.mate_fetches += 1;

        let wanted = anchor.mate_side().opposite();
        Ok(self
            .reads
            .iter()
            .find(|read| {
                read.fragment_id == anchor.fragment_id
                    && read.mate_side() == wanted
                    && read.chrom_id == anchor.mate_chrom_id
                    && read.pos == anchor.mate_pos
            })
            .cloned())
    }
}
