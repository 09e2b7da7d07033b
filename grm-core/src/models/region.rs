use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::CoreError;

///
/// Region struct, a genomic interval on a single contig.
///
/// `start` is 0-based; `end` is the first base past the interval. The overlap test used by
/// read extraction ([`Region::overlaps`]) is inclusive on both bounds, so a read ending
/// exactly at `start` or starting exactly at `end` still counts.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,
}

impl Region {
    pub fn new(chr: impl Into<String>, start: u32, end: u32) -> Self {
        Region {
            chr: chr.into(),
            start,
            end,
        }
    }

    ///
    /// Get length of the region
    ///
    pub fn width(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    ///
    /// Pad the region by `flank` bases on both sides.
    ///
    /// Coordinates are clamped: the start never drops below 0 and the end saturates at
    /// `u32::MAX`.
    ///
    pub fn extended(&self, flank: u32) -> Region {
        Region {
            chr: self.chr.clone(),
            start: self.start.saturating_sub(flank),
            end: self.end.saturating_add(flank),
        }
    }

    ///
    /// Check whether a span of `len` bases starting at `pos` touches this region.
    ///
    /// # Arguments
    /// - pos: 0-based start of the span
    /// - len: length of the span
    ///
    pub fn overlaps(&self, pos: i64, len: i64) -> bool {
        !(pos > i64::from(self.end) || pos + len < i64::from(self.start))
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chr, self.start, self.end)
    }
}

fn parse_coordinate(value: &str, region: &str) -> Result<u32, CoreError> {
    value
        .replace(',', "")
        .trim()
        .parse::<u32>()
        .map_err(|_| CoreError::RegionParse(format!("invalid coordinate '{}' in '{}'", value, region)))
}

impl FromStr for Region {
    type Err = CoreError;

    /// Parse `chr:start-end` or a bare `chr` (whole contig).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CoreError::RegionParse("empty region string".to_string()));
        }

        let Some((chr, range)) = s.rsplit_once(':') else {
            return Ok(Region::new(s, 0, u32::MAX));
        };

        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| CoreError::RegionParse(format!("missing '-' in '{}'", s)))?;

        let start = parse_coordinate(start, s)?;
        let end = parse_coordinate(end, s)?;

        if chr.is_empty() {
            return Err(CoreError::RegionParse(format!("missing contig in '{}'", s)));
        }
        if end < start {
            return Err(CoreError::RegionParse(format!(
                "end is before start in '{}'",
                s
            )));
        }

        Ok(Region::new(chr, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("chr1:1000-2000", Region::new("chr1", 1000, 2000))]
    #[case("chr1:1,000-2,000", Region::new("chr1", 1000, 2000))]
    #[case("HLA-A*01:01:2-5", Region::new("HLA-A*01:01", 2, 5))]
    #[case("chrX", Region::new("chrX", 0, u32::MAX))]
    fn test_parse_region(#[case] input: &str, #[case] expected: Region) {
        assert_eq!(input.parse::<Region>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("chr1:100")]
    #[case("chr1:abc-200")]
    #[case("chr1:300-200")]
    #[case(":1-2")]
    fn test_parse_region_rejects(#[case] input: &str) {
        assert!(matches!(
            input.parse::<Region>(),
            Err(CoreError::RegionParse(_))
        ));
    }

    #[rstest]
    fn test_display_round_trips_through_parse() {
        let region = Region::new("chr2", 5, 50);
        assert_eq!(region.to_string(), "chr2:5-50");
        assert_eq!(region.to_string().parse::<Region>().unwrap(), region);
    }

    #[rstest]
    fn test_extended_clamps_at_zero() {
        let region = Region::new("chr1", 100, 200);
        assert_eq!(region.extended(900), Region::new("chr1", 0, 1100));
        assert_eq!(region.extended(0), region);
    }

    #[rstest]
    fn test_extended_saturates_end() {
        let region = Region::new("chr1", 100, u32::MAX - 10);
        assert_eq!(region.extended(50).end, u32::MAX);
    }

    #[rstest]
    #[case(1000, 100, true)] // starts at region start
    #[case(900, 100, true)] // ends exactly at region start
    #[case(899, 100, false)]
    #[case(2000, 100, true)] // starts exactly at region end
    #[case(2001, 100, false)]
    #[case(500, 5000, true)] // spans the whole region
    fn test_overlaps_is_inclusive(#[case] pos: i64, #[case] len: i64, #[case] expected: bool) {
        let region = Region::new("chr1", 1000, 2000);
        assert_eq!(region.overlaps(pos, len), expected);
    }

    #[rstest]
    fn test_width() {
        assert_eq!(Region::new("chr1", 10, 25).width(), 15);
    }
}
