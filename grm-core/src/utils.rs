use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::{CoreError, Result};
use crate::models::region::Region;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)
        .map_err(|e| CoreError::FileReadError(format!("{}: {}", path.display(), e)))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

/// Parse one line of a region list: either `chr:start-end` or BED-like `chr\tstart\tend`.
/// Columns past the third are ignored.
pub fn parse_region_line(line: &str) -> Result<Region> {
    let mut fields = line.split('\t');
    let first = fields.next().unwrap_or_default();

    match (fields.next(), fields.next()) {
        (Some(start), Some(end)) => format!("{}:{}-{}", first, start, end).parse(),
        (Some(_), None) => Err(CoreError::RegionParse(format!(
            "expected three BED columns in '{}'",
            line
        ))),
        _ => first.parse(),
    }
}

///
/// Read target regions from a file, one region per line.
///
/// Blank lines and lines starting with `#` are skipped. Gzip'd files are decompressed
/// transparently.
///
/// # Arguments
///
/// - path: path to the region list
///
pub fn read_regions(path: &Path) -> Result<Vec<Region>> {
    let reader = get_dynamic_reader(path)?;

    let mut regions = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        regions.push(parse_region_line(line)?);
    }

    if regions.is_empty() {
        return Err(CoreError::EmptyRegionList(path.display().to_string()));
    }

    Ok(regions)
}
