//! Wires CLI overrides into the config and runs one interposed session on the
//! process's own stdin/stdout.
use wiretap_core::api::{AppConfig, CliError, RunnerError, Supervisor};
use wiretap_plugins::factory;

use crate::commands::cli::Args;

/// CLI flags win over config file and environment.
pub fn apply_overrides(cfg: &mut AppConfig, args: &Args) {
    if let Some(program) = &args.program {
        cfg.child.program = program.clone();
    }
    if let Some(jar) = &args.jar {
        cfg.child.jar = Some(jar.clone());
    }
    if let Some(path) = &args.input_log {
        cfg.transcript.input_log = path.clone();
    }
    if let Some(path) = &args.output_log {
        cfg.transcript.output_log = path.clone();
    }
    if !args.child_args.is_empty() {
        cfg.child.args = args.child_args.clone();
    }
}

pub fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: spawn / transcript / stream IO error
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Runner(re) => match re {
            RunnerError::Config(_) => 11,
            RunnerError::Spawn(_) => 20,
            RunnerError::Transcript { .. } => 20,
            RunnerError::Forwarder(_) => 20,
            RunnerError::Task(_) => 50,
        },
        CliError::Decode(_) => 20,
        CliError::Io(_) => 20,
    }
}

#[tracing::instrument(name = "cli.run_app", skip_all)]
pub async fn run_app(cfg: &AppConfig) -> Result<i32, RunnerError> {
    let start = cfg.child.start_args()?;
    let runner = factory::build_runner(cfg);

    let report = Supervisor::new(runner.as_ref(), &cfg.transcript)
        .run(&start, tokio::io::stdin(), tokio::io::stdout())
        .await?;

    tracing::debug!(
        session_id = %report.session_id,
        input_log = %cfg.transcript.input_log.display(),
        output_log = %cfg.transcript.output_log.display(),
        "transcripts complete"
    );
    Ok(0)
}
