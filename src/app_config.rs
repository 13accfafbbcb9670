use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    device: Device,
}

impl AppConfig {
    /// Reads `config` and `config_local` (both optional), then `WTI_` prefixed environment
    /// variables such as `WTI_DEVICE__URL`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(config::File::with_name("config").required(false))
                .add_source(config::File::with_name("config_local").required(false))
                .add_source(environment()),
        )
    }

    pub(crate) fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

fn environment() -> Environment {
    Environment::with_prefix("WTI").prefix_separator("_").separator("__").try_parsing(true)
}

/// Connection settings of the unit. Empty strings fall back to the public WTI demo unit.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Device {
    url: String,
    path_prefix: String,
    username: String,
    password: String,
    self_test: bool,
    #[serde(with = "humantime_serde")]
    timeout: Option<Duration>,
}

impl Device {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn self_test(&self) -> bool {
        self.self_test
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn from_toml(toml: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn empty_configuration_uses_defaults() -> Result<(), ConfigError> {
        let config = from_toml("")?;

        assert_eq!(config.device().url(), "");
        assert_eq!(config.device().username(), "");
        assert!(!config.device().self_test());
        assert_eq!(config.device().timeout(), None);
        Ok(())
    }

    #[test]
    fn device_section_is_read() -> Result<(), ConfigError> {
        let config = from_toml(
            r#"
            [device]
            url = "https://pdu.local/"
            path_prefix = "api/v3/"
            username = "admin"
            password = "secret"
            self_test = true
            timeout = "2s 500ms"
            "#,
        )?;

        let device = config.device();
        assert_eq!(device.url(), "https://pdu.local/");
        assert_eq!(device.path_prefix(), "api/v3/");
        assert_eq!(device.username(), "admin");
        assert_eq!(device.password(), "secret");
        assert!(device.self_test());
        assert_eq!(device.timeout(), Some(Duration::from_millis(2500)));
        Ok(())
    }

    #[test]
    fn environment_variables_use_a_single_underscore_after_the_prefix() -> Result<(), ConfigError> {
        let variables = HashMap::from([
            ("WTI_DEVICE__URL".to_string(), "https://single/".to_string()),
            ("WTI_DEVICE__SELF_TEST".to_string(), "true".to_string()),
            ("WTI__DEVICE__USERNAME".to_string(), "double".to_string()),
        ]);

        let config = AppConfig::from_builder(Config::builder().add_source(environment().source(Some(variables))))?;

        assert_eq!(config.device().url(), "https://single/");
        assert!(config.device().self_test());
        assert_eq!(config.device().username(), "");
        Ok(())
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let result = from_toml(
            r#"
            [device]
            timeout = "soon"
            "#,
        );

        assert!(result.is_err());
    }
}
