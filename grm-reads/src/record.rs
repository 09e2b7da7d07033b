//! Conversion of alignment records into [`Read`]s, shared by the BAM and CRAM sources.
use std::io;
use std::ops::RangeInclusive;

use noodles::core::Position;
use noodles::sam;
use noodles::sam::alignment::record::Flags;

use grm_core::{Read, Region};

use crate::error::{ReadsError, Result};

/// Reference sequence names of an alignment header, in header order.
pub fn contig_names(header: &sam::Header) -> Vec<String> {
    header
        .reference_sequences()
        .keys()
        .map(|name| name.to_string())
        .collect()
}

/// 1-based inclusive query interval covering `region`. Empty regions query one base.
pub fn query_interval(region: &Region) -> Result<RangeInclusive<Position>> {
    let start = region.start as usize + 1;
    let end = (region.end as usize).max(start);

    match (Position::new(start), Position::new(end)) {
        (Some(start), Some(end)) => Ok(start..=end),
        _ => Err(ReadsError::InvalidRegion(region.to_string())),
    }
}

/// Whether a record with these flags takes part in extraction.
pub fn keep_record(flags: Flags) -> bool {
    !(flags.is_unmapped()
        || flags.is_secondary()
        || flags.is_supplementary()
        || flags.is_qc_fail()
        || flags.is_duplicate())
}

///
/// Convert an alignment record into a [`Read`].
///
/// Records rejected by [`keep_record`] and records without a name or placement give
/// `Ok(None)`. Mate coordinates are dropped when the mate is unmapped.
///
pub fn record_to_read(
    record: &dyn sam::alignment::Record,
    header: &sam::Header,
) -> io::Result<Option<Read>> {
    let flags = record.flags()?;
    if !keep_record(flags) {
        return Ok(None);
    }

    let (Some(chrom_id), Some(start), Some(name)) = (
        record.reference_sequence_id(header).transpose()?,
        record.alignment_start().transpose()?,
        record.name(),
    ) else {
        return Ok(None);
    };

    let mate_chrom_id = if flags.is_segmented() && !flags.is_mate_unmapped() {
        record.mate_reference_sequence_id(header).transpose()?
    } else {
        None
    };
    let mate_pos = record
        .mate_alignment_start()
        .transpose()?
        .map_or(-1, |pos| pos.get() as i64 - 1);
    let mapq = record
        .mapping_quality()
        .transpose()?
        .map_or(255, |mapq| mapq.get());

    Ok(Some(Read {
        fragment_id: String::from_utf8_lossy(name.as_ref()).into_owned(),
        chrom_id: Some(chrom_id),
        pos: start.get() as i64 - 1,
        bases: record.sequence().iter().map(char::from).collect(),
        mate_chrom_id,
        mate_pos,
        is_first_mate: !flags.is_segmented() || flags.is_first_segment(),
        is_reverse: flags.is_reverse_complemented(),
        mapq,
    }))
}

/// The single-base region at the anchor's mate coordinate, if the mate is placed.
pub fn mate_region(anchor: &Read, contigs: &[String]) -> Option<Region> {
    let chr = anchor.mate_chrom_id.and_then(|id| contigs.get(id))?;
    let mate_pos = u32::try_from(anchor.mate_pos).ok()?;
    Some(Region::new(chr.clone(), mate_pos, mate_pos.saturating_add(1)))
}

/// Whether `read` is the mate `anchor` points at: same fragment, other side, mate position.
pub fn is_aligned_mate(read: &Read, anchor: &Read) -> bool {
    read.fragment_id == anchor.fragment_id
        && read.mate_side() == anchor.mate_side().opposite()
        && read.pos == anchor.mate_pos
}
