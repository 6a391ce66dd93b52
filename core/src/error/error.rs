use std::path::PathBuf;

use thiserror::Error;

use super::forwarder::ForwarderError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("runner failed: {0}")]
    Runner(#[from] RunnerError),
    #[error("config error: {0}")]
    Config(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("config error: {0}")]
    Config(String),
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("cannot open transcript {}: {source}", path.display())]
    Transcript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("forwarder failed: {0}")]
    Forwarder(#[from] ForwarderError),
    #[error("forwarder task failed: {0}")]
    Task(String),
}
