//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `wiretap_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load, load_default, load_from_path, AppConfig, ChildConfig, LoggingConfig, TranscriptConfig,
};
pub use crate::error::{CliError, ForwarderError, ForwarderOp, RunnerError};
pub use crate::runner::{
    forward, run_session, Direction, RunSessionArgs, RunnerPlugin, RunnerSession,
    RunnerStartArgs, SessionReport, Supervisor,
};
pub use crate::transcript::{decode_transcript, Transcript};
