use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite, DuplexStream};
use wiretap_core::api::{RunnerPlugin, RunnerSession, RunnerStartArgs};

/// The child's side of the pipes handed out by [`PipeRunner`].
pub struct ChildEnds {
    /// What the child reads as its stdin.
    pub stdin: DuplexStream,
    /// What the child writes as its stdout.
    pub stdout: DuplexStream,
}

/// Runner that "spawns" an in-memory child made of two duplex pipes.
pub struct PipeRunner {
    parent: Mutex<Option<(DuplexStream, DuplexStream)>>,
    pub started: AtomicBool,
}

impl PipeRunner {
    pub fn new() -> (Self, ChildEnds) {
        let (parent_stdin, child_stdin) = tokio::io::duplex(64);
        let (child_stdout, parent_stdout) = tokio::io::duplex(64);
        let runner = Self {
            parent: Mutex::new(Some((parent_stdin, parent_stdout))),
            started: AtomicBool::new(false),
        };
        (
            runner,
            ChildEnds {
                stdin: child_stdin,
                stdout: child_stdout,
            },
        )
    }

    pub fn was_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RunnerPlugin for PipeRunner {
    fn name(&self) -> &str {
        "pipe"
    }

    async fn start_session(
        &self,
        _args: &RunnerStartArgs,
    ) -> anyhow::Result<Box<dyn RunnerSession>> {
        self.started.store(true, Ordering::SeqCst);
        let (stdin, stdout) = self
            .parent
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| anyhow::anyhow!("already started"))?;
        Ok(Box::new(PipeSession {
            stdin: Some(stdin),
            stdout: Some(stdout),
        }))
    }
}

struct PipeSession {
    stdin: Option<DuplexStream>,
    stdout: Option<DuplexStream>,
}

impl RunnerSession for PipeSession {
    fn stdin(&mut self) -> Option<Box<dyn AsyncWrite + Unpin + Send>> {
        self.stdin
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncWrite + Unpin + Send>)
    }

    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.stdout
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    fn pid(&self) -> Option<u32> {
        None
    }
}

/// Runner whose spawn always fails, like a missing executable.
pub struct MissingBinaryRunner;

#[async_trait]
impl RunnerPlugin for MissingBinaryRunner {
    fn name(&self) -> &str {
        "missing"
    }

    async fn start_session(
        &self,
        args: &RunnerStartArgs,
    ) -> anyhow::Result<Box<dyn RunnerSession>> {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found", args.cmd),
        )
        .into())
    }
}

pub fn start_args() -> RunnerStartArgs {
    RunnerStartArgs {
        cmd: "child".to_string(),
        args: Vec::new(),
        envs: Default::default(),
    }
}
