use std::fmt;

use thiserror::Error;

use crate::runner::Direction;

/// The step of the per-byte loop that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwarderOp {
    Read,
    WriteDestination,
    WriteLog,
}

impl fmt::Display for ForwarderOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Read => "read",
            Self::WriteDestination => "write-destination",
            Self::WriteLog => "write-log",
        };
        f.write_str(s)
    }
}

/// Fatal I/O failure inside a forwarder. Never retried.
#[derive(Error, Debug)]
pub enum ForwarderError {
    #[error("{direction}: read from source failed: {source}")]
    Read {
        direction: Direction,
        #[source]
        source: std::io::Error,
    },

    #[error("{direction}: write to destination failed: {source}")]
    WriteDestination {
        direction: Direction,
        #[source]
        source: std::io::Error,
    },

    /// Transcript append failed. Continuing would leave a gap in the log.
    #[error("{direction}: transcript write failed: {source}")]
    WriteLog {
        direction: Direction,
        #[source]
        source: std::io::Error,
    },
}

impl ForwarderError {
    pub fn op(&self) -> ForwarderOp {
        match self {
            Self::Read { .. } => ForwarderOp::Read,
            Self::WriteDestination { .. } => ForwarderOp::WriteDestination,
            Self::WriteLog { .. } => ForwarderOp::WriteLog,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Self::Read { direction, .. }
            | Self::WriteDestination { direction, .. }
            | Self::WriteLog { direction, .. } => *direction,
        }
    }

    pub fn is_log_write(&self) -> bool {
        matches!(self, Self::WriteLog { .. })
    }

    pub fn io_error(&self) -> &std::io::Error {
        match self {
            Self::Read { source, .. }
            | Self::WriteDestination { source, .. }
            | Self::WriteLog { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_write_is_reported_as_its_own_op() {
        let err = ForwarderError::WriteLog {
            direction: Direction::Outbound,
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert!(err.is_log_write());
        assert_eq!(err.op(), ForwarderOp::WriteLog);
        assert_eq!(err.direction(), Direction::Outbound);
        assert_eq!(
            err.to_string(),
            "stdout: transcript write failed: disk full"
        );
    }

    #[test]
    fn broken_pipe_keeps_io_kind() {
        let err = ForwarderError::WriteDestination {
            direction: Direction::Inbound,
            source: std::io::ErrorKind::BrokenPipe.into(),
        };
        assert!(!err.is_log_write());
        assert_eq!(err.op().to_string(), "write-destination");
        assert_eq!(err.io_error().kind(), std::io::ErrorKind::BrokenPipe);
    }
}
