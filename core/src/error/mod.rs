#[allow(clippy::module_inception)]
pub mod error;
pub mod forwarder;

pub use error::{CliError, RunnerError};
pub use forwarder::{ForwarderError, ForwarderOp};
