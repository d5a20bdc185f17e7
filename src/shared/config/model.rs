use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub stdout_level: String,
    pub file_level: String,
    pub log_dir: String,
    pub log_to_file: bool,
}

/// Loads settings from an optional config file (`TIRPCLO_CONFIG`, defaulting
/// to `tirpclo.{toml,json,...}` in the working directory). Every knob has a
/// baked-in default, so the binary runs without any file present.
pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("TIRPCLO_CONFIG").unwrap_or_else(|_| "tirpclo".to_string());

    let settings: Settings = config::Config::builder()
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .set_default("logging.log_dir", "logs")?
        .set_default("logging.log_to_file", false)?
        .add_source(config::File::with_name(&config_path).required(false))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
