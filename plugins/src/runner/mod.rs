pub mod process;

pub use wiretap_core::runner::{RunnerPlugin, RunnerSession, RunnerStartArgs};
