use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseInputError {
    #[error("unknown axis `{0}`")]
    UnknownAxis(String),
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("unknown input edge `{0}`")]
    UnknownEdge(String),
}
