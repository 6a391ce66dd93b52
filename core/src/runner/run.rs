use std::time::Instant;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::task::JoinError;

use crate::error::{ForwarderError, RunnerError};
use crate::transcript::Transcript;

use super::forwarder::spawn_forwarder;
use super::traits::RunnerSession;
use super::types::{Direction, SessionReport};

pub struct RunSessionArgs<'a> {
    pub session: Box<dyn RunnerSession>,
    pub input: Box<dyn AsyncRead + Unpin + Send>,
    pub output: Box<dyn AsyncWrite + Unpin + Send>,
    pub input_transcript: Transcript,
    pub output_transcript: Transcript,
    pub session_id: &'a str,
}

/// Runs both forwarders until each reaches EOF.
///
/// The first forwarder error ends the session: the sibling task is aborted,
/// dropping its handles, and the error is returned.
pub async fn run_session(args: RunSessionArgs<'_>) -> Result<SessionReport, RunnerError> {
    let RunSessionArgs {
        mut session,
        input,
        output,
        input_transcript,
        output_transcript,
        session_id,
    } = args;

    let child_stdin = session
        .stdin()
        .ok_or_else(|| RunnerError::Spawn("no stdin".into()))?;
    let child_stdout = session
        .stdout()
        .ok_or_else(|| RunnerError::Spawn("no stdout".into()))?;

    let started_at = Instant::now();

    let mut inbound = spawn_forwarder(input, child_stdin, input_transcript, Direction::Inbound);
    let mut outbound = spawn_forwarder(
        child_stdout,
        output,
        output_transcript,
        Direction::Outbound,
    );

    let mut inbound_bytes = None;
    let mut outbound_bytes = None;

    while inbound_bytes.is_none() || outbound_bytes.is_none() {
        tokio::select! {
            res = &mut inbound, if inbound_bytes.is_none() => {
                match settle(Direction::Inbound, res) {
                    Ok(n) => inbound_bytes = Some(n),
                    Err(e) => {
                        outbound.abort();
                        return Err(e);
                    }
                }
            }
            res = &mut outbound, if outbound_bytes.is_none() => {
                match settle(Direction::Outbound, res) {
                    Ok(n) => outbound_bytes = Some(n),
                    Err(e) => {
                        inbound.abort();
                        return Err(e);
                    }
                }
            }
        }
    }

    let report = SessionReport {
        session_id: session_id.to_string(),
        inbound_bytes: inbound_bytes.unwrap_or_default(),
        outbound_bytes: outbound_bytes.unwrap_or_default(),
        duration_ms: started_at.elapsed().as_millis() as u64,
    };
    tracing::info!(
        session_id = %report.session_id,
        inbound_bytes = report.inbound_bytes,
        outbound_bytes = report.outbound_bytes,
        duration_ms = report.duration_ms,
        "session finished"
    );
    Ok(report)
}

fn settle(
    direction: Direction,
    res: Result<Result<u64, ForwarderError>, JoinError>,
) -> Result<u64, RunnerError> {
    match res {
        Ok(Ok(n)) => {
            tracing::info!(direction = %direction, bytes = n, "forwarder finished");
            Ok(n)
        }
        Ok(Err(e)) => {
            tracing::error!(
                error.kind = "forwarder.io",
                direction = %direction,
                op = %e.op(),
                error.message = %e
            );
            Err(RunnerError::Forwarder(e))
        }
        Err(e) => Err(RunnerError::Task(format!("{direction}: {e}"))),
    }
}
