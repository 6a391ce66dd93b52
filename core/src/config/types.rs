use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::RunnerError;
use crate::runner::RunnerStartArgs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub child: ChildConfig,

    #[serde(default)]
    pub transcript: TranscriptConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr. Stdout is never used: it carries the relayed bytes.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "wiretap_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    false
}

fn default_logging_file() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// The wrapped child process.
///
/// With `jar` set the command line becomes
/// `<program> <jvm_args...> -jar <jar> <args...>`; without it, `<program> <args...>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildConfig {
    #[serde(default = "default_child_program")]
    pub program: String,

    #[serde(default = "default_jvm_args")]
    pub jvm_args: Vec<String>,

    #[serde(default)]
    pub jar: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub env: HashMap<String, String>,
}

fn default_child_program() -> String {
    "java".to_string()
}

fn default_jvm_args() -> Vec<String> {
    vec!["-Dfile.encoding=UTF-8".to_string()]
}

impl Default for ChildConfig {
    fn default() -> Self {
        Self {
            program: default_child_program(),
            jvm_args: default_jvm_args(),
            jar: None,
            args: Vec::new(),
            env: HashMap::new(),
        }
    }
}

impl ChildConfig {
    pub fn start_args(&self) -> Result<RunnerStartArgs, RunnerError> {
        let program = self.program.trim();
        if program.is_empty() {
            return Err(RunnerError::Config("child program is not set".into()));
        }

        let mut args = Vec::new();
        if let Some(jar) = self.jar.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            args.extend(self.jvm_args.iter().cloned());
            args.push("-jar".to_string());
            args.push(jar.to_string());
        }
        args.extend(self.args.iter().cloned());

        Ok(RunnerStartArgs {
            cmd: program.to_string(),
            args,
            envs: self.env.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    #[serde(default = "default_input_log")]
    pub input_log: PathBuf,

    #[serde(default = "default_output_log")]
    pub output_log: PathBuf,
}

fn default_input_log() -> PathBuf {
    PathBuf::from("input.log")
}

fn default_output_log() -> PathBuf {
    PathBuf::from("output.log")
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            input_log: default_input_log(),
            output_log: default_output_log(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.child.program, "java");
        assert_eq!(cfg.child.jvm_args, vec!["-Dfile.encoding=UTF-8"]);
        assert_eq!(cfg.transcript.input_log, PathBuf::from("input.log"));
        assert_eq!(cfg.transcript.output_log, PathBuf::from("output.log"));
        assert!(!cfg.logging.console);
        assert!(cfg.logging.file);
    }

    #[test]
    fn jar_builds_java_command_line() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [child]
            program = "/opt/jdk/bin/java"
            jar = "/srv/indexer.jar"
            args = ["--stdio"]
            "#,
        )
        .unwrap();

        let start = cfg.child.start_args().unwrap();
        assert_eq!(start.cmd, "/opt/jdk/bin/java");
        assert_eq!(
            start.args,
            vec!["-Dfile.encoding=UTF-8", "-jar", "/srv/indexer.jar", "--stdio"]
        );
    }

    #[test]
    fn without_jar_args_pass_through() {
        let child = ChildConfig {
            program: "cat".into(),
            args: vec!["-u".into()],
            ..ChildConfig::default()
        };
        let start = child.start_args().unwrap();
        assert_eq!(start.cmd, "cat");
        assert_eq!(start.args, vec!["-u"]);
    }

    #[test]
    fn blank_program_is_config_error() {
        let child = ChildConfig {
            program: "  ".into(),
            ..ChildConfig::default()
        };
        assert!(matches!(child.start_args(), Err(RunnerError::Config(_))));
    }
}
