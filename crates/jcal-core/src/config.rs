use anyhow::Result;
use config::{Config, ConfigBuilder, FileFormat, builder::DefaultState};
use serde::Deserialize;

use crate::policy::{NumericPolicy, set_numeric_policy};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub numeric: NumericPolicy,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables (`JCAL_NUMERIC_FLOAT`,
    /// `JCAL_LOGGING_LEVEL`, ...) and an optional `jcal.toml`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            .add_source(
                config::Environment::with_prefix("JCAL")
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("jcal").required(false))
            .build()?
            .try_deserialize::<Self>()?)
    }

    /// ## Summary
    /// Loads configuration from an in-memory TOML document, on top of the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or does not deserialize.
    pub fn from_toml_str(document: &str) -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::from_str(document, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?)
    }

    /// ## Summary
    /// Installs the configured numeric policy process-wide and returns the
    /// policy it replaced.
    pub fn apply(&self) -> NumericPolicy {
        tracing::debug!(numeric = ?self.numeric, "Applying settings");
        set_numeric_policy(self.numeric)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder().set_default("logging.level", "info")?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::InvalidValue;

    #[test_log::test]
    fn defaults_apply_without_sources() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.numeric, NumericPolicy::STRICT);
    }

    #[test]
    fn numeric_policy_from_toml() {
        let settings = Settings::from_toml_str(
            "[numeric]\nfloat = 0.5\ninteger = \"raise\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();
        assert_eq!(settings.numeric.float, InvalidValue::Default(0.5));
        assert_eq!(settings.numeric.integer, InvalidValue::Raise);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn invalid_policy_keyword_is_rejected() {
        let result = Settings::from_toml_str("[numeric]\nfloat = \"ignore\"\n");
        assert!(result.is_err());
    }
}
