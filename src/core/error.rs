use thiserror::Error;

/// Rejected simulation or sweep parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("empty_ratio must lie in [0, 1), got {0}")]
    EmptyRatioOutOfRange(f64),

    #[error("similarity_threshold must lie in [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    #[error("At least one race is required")]
    NoRaces,

    #[error("Grid {width}x{height} exceeds the supported cell count")]
    GridTooLarge { width: usize, height: usize },

    #[error("Sweep axis `{0}` has no values")]
    EmptySweepAxis(&'static str),

    #[error("Sweep must run at least one trial per combination")]
    NoTrials,
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
