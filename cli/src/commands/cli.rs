use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Run a child process behind a byte-for-byte stdio relay, transcribing both directions.
#[derive(Parser, Debug)]
#[command(name = "wiretap", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of ~/.wiretap/config.toml or ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Child executable.
    #[arg(long)]
    pub program: Option<String>,

    /// Run `<program> <jvm args> -jar <JAR>`.
    #[arg(long)]
    pub jar: Option<String>,

    /// Transcript of bytes sent to the child.
    #[arg(long)]
    pub input_log: Option<PathBuf>,

    /// Transcript of bytes received from the child.
    #[arg(long)]
    pub output_log: Option<PathBuf>,

    /// Extra arguments for the child, after `--`.
    #[arg(last = true)]
    pub child_args: Vec<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DecodeArgs {
    /// Transcript file to decode.
    pub log: PathBuf,

    /// Write raw bytes here instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Turn a transcript back into the raw bytes it recorded.
    Decode(DecodeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_flags_and_child_args() {
        let args = Args::try_parse_from([
            "wiretap",
            "--program",
            "/usr/bin/java",
            "--jar",
            "server.jar",
            "--input-log",
            "in.log",
            "--",
            "--port",
            "0",
        ])
        .unwrap();

        assert!(args.command.is_none());
        assert_eq!(args.program.as_deref(), Some("/usr/bin/java"));
        assert_eq!(args.jar.as_deref(), Some("server.jar"));
        assert_eq!(args.input_log, Some(PathBuf::from("in.log")));
        assert_eq!(args.output_log, None);
        assert_eq!(args.child_args, vec!["--port", "0"]);
    }

    #[test]
    fn parses_decode_subcommand() {
        let args = Args::try_parse_from(["wiretap", "decode", "output.log", "-o", "raw.bin"]).unwrap();
        match args.command {
            Some(Commands::Decode(d)) => {
                assert_eq!(d.log, PathBuf::from("output.log"));
                assert_eq!(d.out, Some(PathBuf::from("raw.bin")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
