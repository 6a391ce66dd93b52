use tokio::io::AsyncWriteExt;
use wiretap_core::api::{decode_transcript, CliError};

use super::cli::DecodeArgs;

pub async fn decode_cmd(args: &DecodeArgs) -> Result<(), CliError> {
    let log = tokio::fs::read(&args.log)
        .await
        .map_err(|e| CliError::Decode(format!("{}: {e}", args.log.display())))?;
    let raw = decode_transcript(&log);
    tracing::debug!(
        log = %args.log.display(),
        transcript_bytes = log.len(),
        raw_bytes = raw.len(),
        "transcript decoded"
    );

    match &args.out {
        Some(path) => tokio::fs::write(path, &raw).await?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&raw).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn writes_raw_bytes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("input.log");
        let out = dir.path().join("raw.bin");
        std::fs::write(&log, b"AB<CR><LF>\nC").unwrap();

        decode_cmd(&DecodeArgs {
            log,
            out: Some(out.clone()),
        })
        .await
        .unwrap();

        assert_eq!(std::fs::read(&out).unwrap(), b"AB\r\nC".to_vec());
    }

    #[tokio::test]
    async fn missing_transcript_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode_cmd(&DecodeArgs {
            log: dir.path().join("nope.log"),
            out: None,
        })
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Decode(_)));
    }
}
