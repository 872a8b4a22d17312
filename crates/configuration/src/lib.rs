use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, Metrics, Report};

/// Loads the application configuration.
///
/// Every setting has a baked-in default, so a missing `config.toml` is fine;
/// when the file exists its values win.
pub fn load_config() -> Result<Config, ConfigError> {
    load_from(Some("config"))
}

/// Builds the configuration from the defaults plus an optional named file.
/// `None` skips the file lookup entirely, yielding the pure defaults.
fn load_from(file_stem: Option<&str>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder()
        .set_default("report.data_dir", "data")?
        .set_default("report.output_dir", "output")?
        .set_default("metrics.starting_capital", 18_000.0)?
        .set_default("metrics.sorted_drawdown", false)?;

    if let Some(stem) = file_stem {
        builder = builder.add_source(config::File::with_name(stem).required(false));
    }

    let config = builder.build()?.try_deserialize::<Config>()?;

    if config.metrics.starting_capital <= 0.0 {
        return Err(ConfigError::ValidationError(
            "metrics.starting_capital must be positive".to_string(),
        ));
    }

    Ok(config)
}
