use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;

use crate::error::ForwarderError;
use crate::transcript::Transcript;

use super::types::Direction;

/// Relays `source` to `destination` one byte at a time, recording each byte in
/// a transcript created (or truncated) at `log_path`.
pub async fn forward<R, W>(
    source: R,
    destination: W,
    log_path: &Path,
    direction: Direction,
) -> Result<u64, ForwarderError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let transcript = Transcript::create(log_path)
        .await
        .map_err(|source| ForwarderError::WriteLog { direction, source })?;
    forward_to_transcript(source, destination, transcript, direction).await
}

/// Core loop. Returns the number of bytes moved once `source` hits EOF.
///
/// Each byte reaches `destination` (flushed) before it is written to the
/// transcript, and the transcript is flushed before the next read.
pub async fn forward_to_transcript<R, W>(
    mut source: R,
    mut destination: W,
    mut transcript: Transcript,
    direction: Direction,
) -> Result<u64, ForwarderError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut byte = [0u8; 1];
    let mut total = 0u64;

    loop {
        let n = match source.read(&mut byte).await {
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(ForwarderError::Read { direction, source }),
        };
        if n == 0 {
            break;
        }

        destination
            .write_all(&byte)
            .await
            .map_err(|source| ForwarderError::WriteDestination { direction, source })?;
        destination
            .flush()
            .await
            .map_err(|source| ForwarderError::WriteDestination { direction, source })?;

        transcript
            .record(byte[0])
            .await
            .map_err(|source| ForwarderError::WriteLog { direction, source })?;
        total += 1;
    }

    tracing::debug!(
        direction = %direction,
        bytes = total,
        transcript = %transcript.path().display(),
        "source reached end of stream"
    );
    Ok(total)
}

pub fn spawn_forwarder<R, W>(
    source: R,
    destination: W,
    transcript: Transcript,
    direction: Direction,
) -> JoinHandle<Result<u64, ForwarderError>>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(forward_to_transcript(
        source,
        destination,
        transcript,
        direction,
    ))
}
