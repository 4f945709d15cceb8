use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SquadError {
    #[error("No outfield players available")]
    NoOutfieldPlayers,

    #[error("Starting XI incomplete: slot {slot} ({name}) could not be filled")]
    IncompleteLineup { slot: usize, name: &'static str },

    #[error("Invalid formation: {0}")]
    InvalidFormation(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, SquadError>;
