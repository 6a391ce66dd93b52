use clap::Parser;
use wiretap_cli::commands::{cli, decode};
use wiretap_cli::{app, logging};
use wiretap_core::api::CliError;
use wiretap_core::config;

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error.message = %e, "wiretap exiting");
            eprintln!("wiretap: {e}");
            app::exit_code_for_error(&e)
        }
    };

    // process::exit skips destructors, so flush the file appender first.
    logging::flush_logs();
    // A forwarder may still be parked on a blocking stdin read; exit without
    // waiting for the runtime to drain it.
    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let mut args = cli::Args::parse();
    let mut cfg =
        config::load(args.config.as_deref()).map_err(|e| CliError::Config(e.to_string()))?;
    app::apply_overrides(&mut cfg, &args);

    let cmd = args.command.take();
    let label = match &cmd {
        Some(cli::Commands::Decode(_)) => "decode".to_string(),
        None => logging::program_label(&cfg.child.program),
    };
    logging::init_tracing(&cfg.logging, &label).map_err(CliError::Config)?;

    if let Some(cmd) = cmd {
        return dispatch(cmd).await;
    }

    let exit = app::run_app(&cfg).await?;
    Ok(exit)
}

async fn dispatch(cmd: cli::Commands) -> Result<i32, CliError> {
    match cmd {
        cli::Commands::Decode(decode_args) => {
            decode::decode_cmd(&decode_args).await?;
            Ok(0)
        }
    }
}
