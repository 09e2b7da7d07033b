use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, Result};

pub const DEFAULT_MAX_READS_PER_REGION: usize = 10000;
pub const DEFAULT_FRAGMENT_LENGTH: u32 = 300;
pub const DEFAULT_NEARBY_MATE_DISTANCE: i64 = 1000;

///
/// Settings that control read extraction.
///
/// Every field has a default, so a config file only needs the keys it overrides:
///
/// ```toml
/// max_reads_per_region = 5000
/// fragment_length = 450
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractionConfig {
    /// Read budget for a single target region.
    pub max_reads_per_region: usize,
    /// Average fragment length; regions are padded by three times this on each side.
    pub fragment_length: u32,
    /// Mates closer than this (same contig) are not fetched during mate recovery.
    pub nearby_mate_distance: i64,
    /// Number of independent readers used by parallel extraction.
    pub threads: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            max_reads_per_region: DEFAULT_MAX_READS_PER_REGION,
            fragment_length: DEFAULT_FRAGMENT_LENGTH,
            nearby_mate_distance: DEFAULT_NEARBY_MATE_DISTANCE,
            threads: 1,
        }
    }
}

impl ExtractionConfig {
    /// Flank added to each side of a target region before querying reads.
    pub fn flank(&self) -> u32 {
        self.fragment_length.saturating_mul(3)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_reads_per_region == 0 {
            return Err(CoreError::InvalidConfig(
                "max_reads_per_region must be at least 1".to_string(),
            ));
        }
        if self.threads == 0 {
            return Err(CoreError::InvalidConfig(
                "threads must be at least 1".to_string(),
            ));
        }
        if self.nearby_mate_distance < 0 {
            return Err(CoreError::InvalidConfig(
                "nearby_mate_distance must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl TryFrom<&Path> for ExtractionConfig {
    type Error = CoreError;

    fn try_from(path: &Path) -> std::result::Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: ExtractionConfig = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
