use std::path::Path;

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::Instrument;

use crate::config::TranscriptConfig;
use crate::error::RunnerError;
use crate::transcript::Transcript;

use super::run::{run_session, RunSessionArgs};
use super::traits::RunnerPlugin;
use super::types::{RunnerStartArgs, SessionReport};

/// Brings up one interposed session: transcripts first, then the child, then
/// both forwarders.
pub struct Supervisor<'a> {
    plugin: &'a dyn RunnerPlugin,
    transcripts: &'a TranscriptConfig,
}

impl<'a> Supervisor<'a> {
    pub fn new(plugin: &'a dyn RunnerPlugin, transcripts: &'a TranscriptConfig) -> Self {
        Self {
            plugin,
            transcripts,
        }
    }

    /// Relays `input` to the child and the child's output to `output`.
    ///
    /// Both transcripts are created before the child is spawned; if either
    /// cannot be opened the child never starts. The child is neither waited on
    /// nor killed.
    pub async fn run<R, W>(
        &self,
        start: &RunnerStartArgs,
        input: R,
        output: W,
    ) -> Result<SessionReport, RunnerError>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let session_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("session", session_id = %session_id, runner = self.plugin.name());

        async {
            let input_transcript = open_transcript(&self.transcripts.input_log).await?;
            let output_transcript = open_transcript(&self.transcripts.output_log).await?;

            tracing::info!(cmd = %start.cmd, args = ?start.args, "spawning child");
            let session = self
                .plugin
                .start_session(start)
                .await
                .map_err(|e| RunnerError::Spawn(format!("{}: {e:#}", start.cmd)))?;
            tracing::info!(pid = ?session.pid(), "child started");

            run_session(RunSessionArgs {
                session,
                input: Box::new(input),
                output: Box::new(output),
                input_transcript,
                output_transcript,
                session_id: &session_id,
            })
            .await
        }
        .instrument(span)
        .await
    }
}

async fn open_transcript(path: &Path) -> Result<Transcript, RunnerError> {
    Transcript::create(path)
        .await
        .map_err(|source| RunnerError::Transcript {
            path: path.to_path_buf(),
            source,
        })
}
