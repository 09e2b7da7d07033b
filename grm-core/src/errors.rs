use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Error parsing region: {0}")]
    RegionParse(String),

    #[error("No regions found in: {0}")]
    EmptyRegionList(String),

    #[error("Invalid extraction config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
