use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a tagging run. Anything that reaches this type stops the run.
#[derive(Error, Debug)]
pub enum FlowLogError {
    #[error("Lookup table file '{}' could not be opened: {source}", .path.display())]
    LookupFileMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Flow log file '{}' could not be opened: {source}", .path.display())]
    FlowLogMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed reading flow log '{}': {source}", .path.display())]
    FlowLogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing report to '{}': {source}", .path.display())]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Flow log has already been processed by this aggregator")]
    AlreadyProcessed,

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FlowLogError>;
