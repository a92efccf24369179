use std::path::PathBuf;

use thiserror::Error;

/// Fatal error kinds. Every row of the error-handling table maps to one
/// variant; none are retried and none map to anything but exit code 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("usage: missing INPUT or OUTPUT argument")]
    BadArguments,

    #[error("{path}: not a readable directory or file")]
    CannotListInputs { path: PathBuf },

    #[error("{path}: input file empty (zero parseable records)")]
    EmptyInput { path: PathBuf },

    #[error("{path}: failed to open: {source}")]
    InputOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: failed to open for writing: {source}")]
    OutputOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("descriptor limit: need soft limit {needed}, hard limit is {hard}")]
    DescriptorLimit { needed: u64, hard: u64 },

    #[error("{path}: codec failure: {message}")]
    CodecFailure { path: PathBuf, message: String },

    #[error("out of memory")]
    OutOfMemory,

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
