use wiretap_core::config::AppConfig;
use wiretap_core::runner::RunnerPlugin;

use crate::runner::process::ProcessRunnerPlugin;

pub fn build_runner(_cfg: &AppConfig) -> Box<dyn RunnerPlugin> {
    Box::new(ProcessRunnerPlugin::new())
}
