use crate::data::InputOrder;
use crate::strategy::SignalBands;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "backtest.toml";
pub const ENV_PREFIX: &str = "BACKTEST";

/// Runtime settings for the backtest CLI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Directory of `<TICKER>.txt` price files
    pub prices_dir: PathBuf,
    /// Where the results book is written
    pub output_path: PathBuf,
    pub input_order: InputOrder,
    /// `tracing_subscriber` filter, used when `RUST_LOG` is unset
    pub log_filter: String,
    pub bands: SignalBands,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prices_dir: PathBuf::from("prices"),
            output_path: PathBuf::from("results.json"),
            input_order: InputOrder::MostRecentFirst,
            log_filter: "signal_backtest=info".to_string(),
            bands: SignalBands::default(),
        }
    }
}

impl AppConfig {
    /// Layer defaults, the optional config file, then `BACKTEST__*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let settings = config::Config::builder()
            .set_default("prices_dir", defaults.prices_dir.display().to_string())?
            .set_default("output_path", defaults.output_path.display().to_string())?
            .set_default("input_order", "most_recent_first")?
            .set_default("log_filter", defaults.log_filter)?
            .set_default("bands.window", defaults.bands.window as u64)?
            .set_default("bands.upper", defaults.bands.upper.to_string())?
            .set_default("bands.lower", defaults.bands.lower.to_string())?
            .add_source(config::File::from(file).required(path.is_some()))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        tracing::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}
