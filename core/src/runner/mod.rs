mod forwarder;
mod run;
mod supervisor;
mod traits;
pub mod types;

pub use forwarder::{forward, forward_to_transcript, spawn_forwarder};
pub use run::{run_session, RunSessionArgs};
pub use supervisor::Supervisor;
pub use traits::{RunnerPlugin, RunnerSession};
pub use types::{Direction, RunnerStartArgs, SessionReport};
