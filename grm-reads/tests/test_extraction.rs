use grm_core::{ExtractionConfig, MateSide, Read, Region};
use grm_reads::{
    MemoryReadSource, extract_reads, extract_reads_from_region, is_read_or_its_mate_in_region,
};

use pretty_assertions::assert_eq;
use rstest::*;

fn bases(len: usize) -> String {
    "ACGT".chars().cycle().take(len).collect()
}

#[fixture]
fn region() -> Region {
    Region::new("chr1", 1000, 2000)
}

#[rstest]
fn test_forty_reads_with_nearby_mates(region: Region) {
    let reads = (0..20).flat_map(|i| {
        let pos = 1000 + i * 45;
        [
            Read::new(format!("frag{i}"), 0, pos, bases(100)).with_mate(0, pos + 300),
            Read::new(format!("frag{i}"), 0, pos + 300, bases(100))
                .with_mate(0, pos)
                .with_side(MateSide::Second)
                .with_reverse(true),
        ]
    });
    let mut source = MemoryReadSource::new(["chr1"]).with_reads(reads);
    let config = ExtractionConfig {
        max_reads_per_region: 50,
        fragment_length: 300,
        ..Default::default()
    };

    let extraction = extract_reads_from_region(&mut source, &region, &config).unwrap();

    assert_eq!((extraction.num_original, extraction.num_recovered), (40, 0));
    assert_eq!(source.mate_fetches(), 0);
}

#[rstest]
fn test_every_returned_read_touches_region(region: Region) {
    // a grid of reads and mates scattered around the padded window
    let mut reads = Vec::new();
    for i in 0..40i64 {
        let pos = 50 + i * 75;
        let mate_pos = 3000 - i * 70;
        let len = 20 + (i as usize % 5) * 20;
        reads.push(Read::new(format!("g{i}"), 0, pos, bases(len)).with_mate(0, mate_pos));
    }
    let mut source = MemoryReadSource::new(["chr1"]).with_reads(reads.clone());
    let config = ExtractionConfig {
        max_reads_per_region: 1000,
        ..Default::default()
    };

    let extracted = extract_reads(&mut source, &[region.clone()], &config).unwrap();

    assert!(!extracted.is_empty());
    for read in &extracted {
        assert!(is_read_or_its_mate_in_region(read, &region));
    }

    let expected = reads
        .iter()
        .filter(|read| is_read_or_its_mate_in_region(read, &region))
        .count();
    assert_eq!(extracted.len(), expected);
}

#[rstest]
fn test_mate_recovery_across_contigs(region: Region) {
    let mut source = MemoryReadSource::new(["chr1", "chr7"]).with_reads([
        Read::new("bnd", 0, 1500, bases(150)).with_mate(1, 12_345),
        Read::new("bnd", 1, 12_345, bases(150))
            .with_mate(0, 1500)
            .with_side(MateSide::Second),
    ]);

    let extraction =
        extract_reads_from_region(&mut source, &region, &ExtractionConfig::default()).unwrap();

    assert_eq!(extraction.num_original, 1);
    assert_eq!(extraction.num_recovered, 1);
    let mut contigs: Vec<Option<usize>> = extraction.reads.iter().map(|r| r.chrom_id).collect();
    contigs.sort();
    assert_eq!(contigs, vec![Some(0), Some(1)]);
}
