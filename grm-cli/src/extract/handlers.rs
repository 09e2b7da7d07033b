use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use grm_core::utils::read_regions;
use grm_core::{ExtractionConfig, Read, Region};
use grm_reads::{AlignmentReadSource, extract_reads, extract_reads_parallel};

pub fn run_extract(matches: &ArgMatches) -> Result<()> {
    let bam = matches
        .get_one::<String>("bam")
        .expect("A path to a BAM or CRAM file is required.");
    let reference = matches.get_one::<String>("reference").map(Path::new);

    let regions = matches
        .get_one::<String>("regions")
        .expect("Target regions are required.");

    let config = build_config(matches)?;
    let regions = parse_regions(regions)?;
    let output = matches.get_one::<String>("output");

    let mut source = AlignmentReadSource::open(bam, reference)
        .with_context(|| format!("Failed to open alignment file: {}", bam))?;
    info!("Retrieving reads from {} ({})", bam, source.format());

    let reads = if config.threads > 1 {
        extract_reads_parallel(|| AlignmentReadSource::open(bam, reference), &regions, &config)?
    } else {
        extract_reads(&mut source, &regions, &config)?
    };
    info!("Done retrieving {} reads from {}", reads.len(), bam);

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create output: {}", path))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    write_reads(BufWriter::new(writer), &reads, source.contigs())?;

    Ok(())
}

/// Settings from `--config` (or defaults), overridden by explicit flags.
pub fn build_config(matches: &ArgMatches) -> Result<ExtractionConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ExtractionConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => ExtractionConfig::default(),
    };

    if let Some(max_reads) = matches.get_one::<usize>("max-reads") {
        config.max_reads_per_region = *max_reads;
    }
    if let Some(fragment_length) = matches.get_one::<u32>("fragment-length") {
        config.fragment_length = *fragment_length;
    }
    if let Some(threads) = matches.get_one::<usize>("threads") {
        config.threads = *threads;
    }

    config.validate()?;
    Ok(config)
}

/// A path to a region list, or a comma separated list of regions.
pub fn parse_regions(regions: &str) -> Result<Vec<Region>> {
    let path = Path::new(regions);
    if path.is_file() {
        return read_regions(path).with_context(|| format!("Failed to read regions: {}", regions));
    }

    regions
        .split(',')
        .filter(|region| !region.trim().is_empty())
        .map(|region| region.parse::<Region>().map_err(anyhow::Error::from))
        .collect()
}

pub fn write_reads<W: Write>(mut writer: W, reads: &[Read], contigs: &[String]) -> Result<()> {
    let contig_name = |id: Option<usize>| {
        id.and_then(|id| contigs.get(id))
            .map_or("*", String::as_str)
    };

    writeln!(
        writer,
        "#fragment_id\tchrom\tpos\tmate_chrom\tmate_pos\tmate\tstrand\tmapq\tbases"
    )?;
    for read in reads {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            read.fragment_id,
            contig_name(read.chrom_id),
            read.pos,
            contig_name(read.mate_chrom_id),
            read.mate_pos,
            if read.is_first_mate { 1 } else { 2 },
            if read.is_reverse { '-' } else { '+' },
            read.mapq,
            read.bases,
        )?;
    }
    writer.flush()?;
    Ok(())
}
