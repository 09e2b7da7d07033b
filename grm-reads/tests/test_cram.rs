use std::fs::File;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use noodles::core::Position;
use noodles::cram::{self, crai};
use noodles::sam;
use noodles::sam::alignment::RecordBuf;
use noodles::sam::alignment::io::Write as _;
use noodles::sam::alignment::record::cigar::{Op, op::Kind};
use noodles::sam::alignment::record::{Flags, MappingQuality};
use noodles::sam::alignment::record_buf::{Cigar, QualityScores, Sequence};
use noodles::sam::header::record::value::{Map, map::ReferenceSequence};
use tempfile::TempDir;

use grm_core::{ExtractionConfig, MateSide, Region};
use grm_reads::cram::reference_repository;
use grm_reads::{AlignmentFormat, AlignmentReadSource, ReadSource, extract_reads_from_region};

use pretty_assertions::assert_eq;
use rstest::*;

const CONTIG_LENGTH: usize = 6000;
const READ_LENGTH: usize = 20;

fn reference_bases() -> Vec<u8> {
    b"ACGTTGCA".iter().cycle().take(CONTIG_LENGTH).copied().collect()
}

struct CramFiles {
    _dir: TempDir,
    cram: PathBuf,
    reference: PathBuf,
}

fn write_reference(path: &Path, bases: &[u8]) {
    let mut fasta = File::create(path).unwrap();
    writeln!(fasta, ">chr1").unwrap();
    fasta.write_all(bases).unwrap();
    writeln!(fasta).unwrap();

    // name, length, offset of the first base, bases per line, bytes per line
    let mut fai = File::create(path.with_extension("fa.fai")).unwrap();
    writeln!(
        fai,
        "chr1\t{}\t6\t{}\t{}",
        bases.len(),
        bases.len(),
        bases.len() + 1
    )
    .unwrap();
}

fn mate_record(
    name: &str,
    side: MateSide,
    pos: usize,
    mate_pos: usize,
    reference: &[u8],
) -> RecordBuf {
    let flags = Flags::SEGMENTED
        | Flags::PROPERLY_SEGMENTED
        | match side {
            MateSide::First => Flags::FIRST_SEGMENT | Flags::MATE_REVERSE_COMPLEMENTED,
            MateSide::Second => Flags::LAST_SEGMENT | Flags::REVERSE_COMPLEMENTED,
        };
    let span = (mate_pos.abs_diff(pos) + READ_LENGTH) as i32;
    let template_length = if mate_pos > pos { span } else { -span };

    RecordBuf::builder()
        .set_name(name)
        .set_flags(flags)
        .set_reference_sequence_id(0)
        .set_alignment_start(Position::try_from(pos + 1).unwrap())
        .set_mapping_quality(MappingQuality::new(60).unwrap())
        .set_cigar([Op::new(Kind::Match, READ_LENGTH)].into_iter().collect::<Cigar>())
        .set_sequence(Sequence::from(reference[pos..pos + READ_LENGTH].to_vec()))
        .set_quality_scores(QualityScores::from(vec![30; READ_LENGTH]))
        .set_mate_reference_sequence_id(0)
        .set_mate_alignment_start(Position::try_from(mate_pos + 1).unwrap())
        .set_template_length(template_length)
        .build()
}

///
/// One contig, a fragment with both mates near 1000 ("near") and one with its second mate at
/// 5000 ("far"). The CRAM is written against the reference and indexed next to it.
///
#[fixture]
fn cram_files() -> CramFiles {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("ref.fa");
    let cram_path = dir.path().join("reads.cram");

    let bases = reference_bases();
    write_reference(&reference, &bases);

    let header = sam::Header::builder()
        .add_reference_sequence(
            "chr1",
            Map::<ReferenceSequence>::new(NonZeroUsize::try_from(CONTIG_LENGTH).unwrap()),
        )
        .build();
    let records = [
        mate_record("near", MateSide::First, 1000, 1200, &bases),
        mate_record("far", MateSide::First, 1050, 5000, &bases),
        mate_record("near", MateSide::Second, 1200, 1000, &bases),
        mate_record("far", MateSide::Second, 5000, 1050, &bases),
    ];

    let mut writer = cram::io::writer::Builder::default()
        .set_reference_sequence_repository(reference_repository(&reference).unwrap())
        .build_from_path(&cram_path)
        .unwrap();
    writer.write_alignment_header(&header).unwrap();
    for record in &records {
        writer.write_alignment_record(&header, record).unwrap();
    }
    writer.finish(&header).unwrap();

    let index = cram::index(&cram_path).unwrap();
    {
        let mut crai_writer =
            crai::Writer::new(File::create(cram_path.with_extension("cram.crai")).unwrap());
        crai_writer.write_index(&index).unwrap();
    }

    CramFiles {
        _dir: dir,
        cram: cram_path,
        reference,
    }
}

#[rstest]
fn test_cram_is_detected_and_opened(cram_files: CramFiles) {
    assert_eq!(AlignmentFormat::detect(&cram_files.cram), AlignmentFormat::Cram);

    let source =
        AlignmentReadSource::open(&cram_files.cram, Some(cram_files.reference.as_path())).unwrap();
    assert_eq!(source.format(), AlignmentFormat::Cram);
    assert_eq!(source.contigs().to_vec(), vec!["chr1".to_string()]);
}

#[rstest]
fn test_cram_query_restores_bases(cram_files: CramFiles) {
    let mut source =
        AlignmentReadSource::open(&cram_files.cram, Some(cram_files.reference.as_path())).unwrap();

    let reads = source
        .query(&Region::new("chr1", 1000, 1100))
        .unwrap()
        .collect::<grm_reads::Result<Vec<_>>>()
        .unwrap();

    let names: Vec<&str> = reads.iter().map(|read| read.fragment_id.as_str()).collect();
    assert_eq!(names, vec!["near", "far"]);

    let bases = reference_bases();
    let far = &reads[1];
    assert_eq!(far.pos, 1050);
    assert_eq!(far.mate_pos, 5000);
    assert_eq!(far.bases.as_bytes(), &bases[1050..1050 + READ_LENGTH]);
}

#[rstest]
fn test_cram_extraction_recovers_distant_mate(cram_files: CramFiles) {
    let mut source =
        AlignmentReadSource::open(&cram_files.cram, Some(cram_files.reference.as_path())).unwrap();
    let config = ExtractionConfig {
        fragment_length: 50,
        ..Default::default()
    };

    let extraction =
        extract_reads_from_region(&mut source, &Region::new("chr1", 1000, 1100), &config).unwrap();

    assert_eq!((extraction.num_original, extraction.num_recovered), (3, 1));

    let recovered = extraction
        .reads
        .iter()
        .find(|read| read.fragment_id == "far" && read.mate_side() == MateSide::Second)
        .unwrap();
    assert_eq!(recovered.pos, 5000);
    assert!(recovered.is_reverse);
}
