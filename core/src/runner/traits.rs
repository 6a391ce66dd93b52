use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};

use super::types::RunnerStartArgs;

/// A running child process. Each handle can be taken once.
pub trait RunnerSession: Send {
    fn stdin(&mut self) -> Option<Box<dyn AsyncWrite + Unpin + Send>>;
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    fn pid(&self) -> Option<u32>;
}

#[async_trait]
pub trait RunnerPlugin: Send + Sync {
    fn name(&self) -> &str;
    async fn start_session(&self, args: &RunnerStartArgs)
        -> anyhow::Result<Box<dyn RunnerSession>>;
}
