use clap::{Command, arg, value_parser};

pub const EXTRACT_CMD: &str = "extract";

pub fn create_extract_cli() -> Command {
    Command::new(EXTRACT_CMD)
        .about("Extract read pairs around target regions from an indexed BAM or CRAM file.")
        .arg_required_else_help(true)
        .arg(arg!(-b --bam <ALIGNMENTS> "Indexed BAM or CRAM file").required(true))
        .arg(
            arg!(-R --reference <FASTA> "Indexed reference FASTA, needed to decode CRAM")
                .required(false),
        )
        .arg(
            arg!(-r --regions <REGIONS> "Comma separated chr:start-end list, or a file with one region per line")
                .required(true),
        )
        .arg(arg!(-c --config <CONFIG> "TOML file with extraction settings").required(false))
        .arg(
            arg!(-m --"max-reads" <MAX_READS> "Maximum number of reads per region")
                .required(false)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(-l --"fragment-length" <LENGTH> "Average fragment length; regions are padded by 3x this")
                .required(false)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(-t --threads <THREADS> "Number of alignment readers to run in parallel")
                .required(false)
                .value_parser(value_parser!(usize)),
        )
        .arg(arg!(-o --output <OUTPUT> "Output TSV file (default: stdout)").required(false))
}
