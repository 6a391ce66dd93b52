mod load;
mod types;

pub use load::{
    apply_env_overrides, default_log_directory, get_wiretap_data_dir, load, load_default,
    load_from_path,
};
pub use types::{AppConfig, ChildConfig, LoggingConfig, TranscriptConfig};
