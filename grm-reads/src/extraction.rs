use log::{debug, info, warn};
use rayon::prelude::*;

use grm_core::{ExtractionConfig, Read, Region};

use crate::error::Result;
use crate::pairs::ReadPairs;
use crate::source::ReadSource;

/// Reads pulled for one target region.
#[derive(Debug, Default)]
pub struct RegionExtraction {
    pub reads: Vec<Read>,
    /// Reads found by the region scan itself.
    pub num_original: usize,
    /// Mates fetched afterwards by [`recover_missing_mates`].
    pub num_recovered: usize,
}

impl RegionExtraction {
    /// Whether the region scan stopped because it hit the read budget.
    pub fn saturated(&self, max_reads: usize) -> bool {
        self.num_original == max_reads
    }
}

///
/// Extract reads for every target region, one region at a time.
///
/// The read budget in `config` applies to each region separately. Reads from all regions are
/// concatenated; a fragment spanning two regions can be returned twice.
///
/// # Arguments
/// - reader: an open read source
/// - regions: target regions, processed in order
/// - config: read budget, fragment length and mate recovery threshold
///
pub fn extract_reads<S>(
    reader: &mut S,
    regions: &[Region],
    config: &ExtractionConfig,
) -> Result<Vec<Read>>
where
    S: ReadSource + ?Sized,
{
    let mut all_reads = Vec::new();
    for region in regions {
        info!("[Retrieving for region {}.]", region);
        let extraction = extract_reads_from_region(reader, region, config)?;

        if extraction.saturated(config.max_reads_per_region) {
            warn!(
                "Reached maximum number of reads ({}) for region {}.",
                config.max_reads_per_region, region
            );
        } else {
            info!(
                "[Retrieved {} + {} additional reads]",
                extraction.num_original, extraction.num_recovered
            );
        }
        all_reads.extend(extraction.reads);
    }
    Ok(all_reads)
}

///
/// Extract the reads of a single target region.
///
/// The source is queried over the region padded by `3 * fragment_length`. Reads touching the
/// region (directly or through their mate) are collected until the budget is hit. If the budget
/// was not hit, missing mates are recovered from the same source.
///
pub fn extract_reads_from_region<S>(
    reader: &mut S,
    region: &Region,
    config: &ExtractionConfig,
) -> Result<RegionExtraction>
where
    S: ReadSource + ?Sized,
{
    let extended_region = region.extended(config.flank());

    let mut read_pairs = ReadPairs::new();
    extract_mapped_reads_from_region(
        reader,
        &extended_region,
        region,
        config.max_reads_per_region,
        &mut read_pairs,
    )?;

    let num_original = read_pairs.num_reads();
    let num_recovered = if num_original == config.max_reads_per_region {
        0
    } else {
        recover_missing_mates(reader, &mut read_pairs, config.nearby_mate_distance)?;
        read_pairs.num_reads() - num_original
    };

    Ok(RegionExtraction {
        reads: read_pairs.into_reads(),
        num_original,
        num_recovered,
    })
}

///
/// Scan `query_region` and add every read that is in `region` (or whose mate is) to
/// `read_pairs`, stopping as soon as `max_reads` reads are held.
///
pub fn extract_mapped_reads_from_region<S>(
    reader: &mut S,
    query_region: &Region,
    region: &Region,
    max_reads: usize,
    read_pairs: &mut ReadPairs,
) -> Result<()>
where
    S: ReadSource + ?Sized,
{
    let mut records = reader.query(query_region)?;
    while read_pairs.num_reads() < max_reads {
        let Some(read) = records.next() else {
            break;
        };
        let read = read?;
        if is_read_or_its_mate_in_region(&read, region) {
            read_pairs.add(read);
        }
    }
    Ok(())
}

///
/// Whether a read or its mate overlaps `region` by at least one base.
///
/// The mate's span is estimated with this read's length since the mate's own length is not
/// known until the mate is loaded. With mates of different lengths this can be off by the
/// length difference.
///
pub fn is_read_or_its_mate_in_region(read: &Read, region: &Region) -> bool {
    let len = read.len();
    if region.overlaps(read.pos, len) {
        return true;
    }
    read.mate_on_same_contig() && region.overlaps(read.mate_pos, len)
}

///
/// Fetch the missing mate of every incomplete pair.
///
/// Mates on the same contig closer than `nearby_mate_distance` to their anchor are not
/// fetched; the region scan already had its chance to see them. A mate the source cannot find
/// leaves its slot empty.
///
pub fn recover_missing_mates<S>(
    reader: &mut S,
    read_pairs: &mut ReadPairs,
    nearby_mate_distance: i64,
) -> Result<()>
where
    S: ReadSource + ?Sized,
{
    for anchor in read_pairs.anchors() {
        if anchor.mate_chrom_id.is_none() {
            debug!("Mate of {} is unmapped; not recovering", anchor.fragment_id);
            continue;
        }
        if anchor.mate_on_same_contig() && anchor.mate_distance() < nearby_mate_distance {
            continue;
        }

        match reader.aligned_mate(&anchor)? {
            Some(mate) => {
                read_pairs.add(mate);
            }
            None => debug!("Could not recover mate of {}", anchor.fragment_id),
        }
    }
    Ok(())
}

///
/// Extract reads for many regions on a pool of `config.threads` workers.
///
/// Regions are split into contiguous chunks; each worker opens its own source with `open`
/// and runs [`extract_reads`] over its chunk. Reads come back in region order.
///
pub fn extract_reads_parallel<S, F>(
    open: F,
    regions: &[Region],
    config: &ExtractionConfig,
) -> Result<Vec<Read>>
where
    S: ReadSource,
    F: Fn() -> Result<S> + Sync,
{
    if regions.is_empty() {
        return Ok(Vec::new());
    }

    let threads = config.threads.max(1);
    let chunk_size = regions.len().div_ceil(threads);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    let chunks: Vec<Vec<Read>> = pool.install(|| {
        regions
            .par_chunks(chunk_size)
            .map(|chunk| {
                let mut reader = open()?;
                extract_reads(&mut reader, chunk, config)
            })
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(chunks.into_iter().flatten().collect())
}
