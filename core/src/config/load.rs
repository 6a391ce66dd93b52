use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default wiretap data directory: ~/.wiretap
pub fn get_wiretap_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".wiretap"))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    Ok(toml::from_str::<AppConfig>(&s)?)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    load(None)
}

/// Loads `explicit` if given, otherwise the first of `~/.wiretap/config.toml`
/// and `./config.toml`, falling back to defaults. Log directory defaulting and
/// env overrides apply either way.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let data_dir = get_wiretap_data_dir()?;

    let mut cfg = match explicit {
        Some(path) => load_from_path(path)?,
        None => {
            // Priority 1: ~/.wiretap/config.toml (highest)
            let home_config = data_dir.join("config.toml");
            // Priority 2: ./config.toml (current directory)
            let local_config = Path::new("config.toml");

            if home_config.exists() {
                load_from_path(&home_config)?
            } else if local_config.exists() {
                load_from_path(local_config)?
            } else {
                AppConfig::default()
            }
        }
    };

    default_log_directory(&mut cfg, &data_dir);
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

/// Points file logging at `<data_dir>/logs` unless a directory is configured.
pub fn default_log_directory(cfg: &mut AppConfig, data_dir: &Path) {
    if cfg
        .logging
        .directory
        .as_deref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true)
    {
        cfg.logging.directory = Some(data_dir.join("logs").to_string_lossy().to_string());
    }
}

/// Environment variable overrides; blank values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("WIRETAP_PROGRAM") {
        cfg.child.program = v;
    }
    if let Some(v) = get("WIRETAP_JAR") {
        cfg.child.jar = Some(v);
    }
    if let Some(v) = get("WIRETAP_INPUT_LOG") {
        cfg.transcript.input_log = PathBuf::from(v);
    }
    if let Some(v) = get("WIRETAP_OUTPUT_LOG") {
        cfg.transcript.output_log = PathBuf::from(v);
    }
}
