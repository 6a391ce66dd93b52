use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone)]
pub struct RunnerStartArgs {
    pub cmd: String,
    pub args: Vec<String>,
    pub envs: HashMap<String, String>,
}

/// Which way a forwarder moves bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Our stdin into the child's stdin.
    Inbound,
    /// The child's stdout to our stdout.
    Outbound,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Inbound => "stdin",
            Self::Outbound => "stdout",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct SessionReport {
    pub session_id: String,
    pub inbound_bytes: u64,
    pub outbound_bytes: u64,
    pub duration_ms: u64,
}
