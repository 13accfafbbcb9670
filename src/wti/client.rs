use crate::app_config::AppConfig;
use crate::wti::connection::ConnectionConfig;
use crate::wti::domain::{BranchReading, FirmwareVersion, SelfTestOutcome, Temperature};
use crate::wti::extract::{self, ExtractError};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde_json::{Number, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Builds the HTTP client used for every request. Certificates are always verified and idle
/// connections are never kept, so each request opens its own connection. `None` disables the
/// timeout.
pub fn new_http_client(timeout: Option<Duration>) -> Result<Client, WtiError> {
    let client = Client::builder().timeout(timeout).pool_max_idle_per_host(0).build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum WtiError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unable to decode the response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unable to extract a field: {0}")]
    Extract(#[from] ExtractError),
}

/// Client for the JSON REST API of a WTI power distribution unit.
#[derive(Debug)]
pub struct WtiClient {
    client: Client,
    connection: ConnectionConfig,
}

impl WtiClient {
    pub fn new(connection: ConnectionConfig) -> Result<Self, WtiError> {
        Self::with_timeout(connection, None)
    }

    pub fn with_timeout(connection: ConnectionConfig, timeout: Option<Duration>) -> Result<Self, WtiError> {
        Ok(WtiClient {
            client: new_http_client(timeout)?,
            connection,
        })
    }

    pub fn builder() -> WtiClientBuilder {
        WtiClientBuilder::default()
    }

    /// Creates a client from the `[device]` section, running the self-test when it is enabled.
    pub fn from_config(config: &AppConfig) -> Result<Self, WtiError> {
        let device = config.device();
        WtiClient::builder()
            .url(device.url())
            .path_prefix(device.path_prefix())
            .username(device.username())
            .password(device.password())
            .timeout(device.timeout())
            .self_test(device.self_test())
            .build()
    }

    pub fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    /// Probes the firmware endpoint to check the URL and the credentials. Problems with the
    /// answer are logged and returned, only transport and decode failures are errors.
    #[instrument(skip(self))]
    pub fn self_test(&self) -> Result<SelfTestOutcome, WtiError> {
        let response = self.send("firmware")?;
        let status = response.status();

        if status != StatusCode::OK {
            warn!(status_code = %status, "⚠️ Connection error to {} status code: {}", self.connection.url(), status.as_u16());
            return Ok(SelfTestOutcome::ConnectionError { status });
        }

        let body = decode(response)?;
        match extract::status_code(&body)? {
            None => {
                warn!("⚠️ Connection successful, but could not extract 'okay' code from json");
                info!("{}", body);
                Ok(SelfTestOutcome::StatusCodeMissing { body })
            }
            Some(0) => {
                info!("✅ Self-test completed successfully");
                Ok(SelfTestOutcome::Passed)
            }
            Some(code) => Ok(SelfTestOutcome::Accepted { code }),
        }
    }

    /// Fetches `suffix` and returns the parsed body. The status code is not checked.
    #[instrument(skip(self))]
    pub fn get_json(&self, suffix: &str) -> Result<Value, WtiError> {
        let response = self.send(suffix)?;
        debug!(status_code = %response.status(), "Fetched {}", response.url());
        decode(response)
    }

    pub fn get_temperature(&self, no_format: bool) -> Result<Temperature, WtiError> {
        Ok(extract::temperature(&self.get_json("temperature")?, no_format)?)
    }

    pub fn get_alarms(&self) -> Result<Vec<Value>, WtiError> {
        Ok(extract::alarms(&self.get_json("alarms")?)?)
    }

    pub fn get_hostname(&self) -> Result<String, WtiError> {
        Ok(extract::hostname(&self.get_json("hostname")?)?)
    }

    pub fn get_location(&self) -> Result<String, WtiError> {
        Ok(extract::location(&self.get_json("hostname")?)?)
    }

    pub fn get_current(&self) -> Result<Vec<BranchReading>, WtiError> {
        Ok(extract::current(&self.get_json("current")?)?)
    }

    /// Voltage per branch, read from the `power` endpoint.
    pub fn get_voltage(&self) -> Result<Vec<BranchReading>, WtiError> {
        Ok(extract::voltage(&self.get_json("power")?)?)
    }

    #[deprecated(note = "returns the voltage per branch, use `get_voltage`")]
    pub fn get_power(&self) -> Result<Vec<BranchReading>, WtiError> {
        self.get_voltage()
    }

    /// Wattage of `branch1` only.
    pub fn get_wattage(&self) -> Result<Number, WtiError> {
        Ok(extract::wattage(&self.get_json("current")?)?)
    }

    pub fn get_version(&self) -> Result<Vec<FirmwareVersion>, WtiError> {
        Ok(extract::firmware_version(&self.get_json("firmware")?)?)
    }

    pub fn change_url(&mut self, url: &str) -> String {
        let previous = self.connection.set_url(url);
        info!("Changed {} to {}", previous, url);
        previous
    }

    pub fn change_url_suffix(&mut self, url_suffix: &str) -> String {
        let previous = self.connection.set_path_prefix(url_suffix);
        info!("Changed {} to {}", previous, url_suffix);
        previous
    }

    pub fn change_username(&mut self, username: &str) -> String {
        let previous = self.connection.set_username(username);
        info!("Changed {} to {}", previous, username);
        previous
    }

    pub fn change_password(&mut self, password: &str) -> String {
        let previous = self.connection.set_password(password);
        info!("Changed {} to {}", previous, password);
        previous
    }

    pub fn print_information(&self) {
        for line in self.connection.to_string().lines() {
            info!("{}", line);
        }
    }

    fn send(&self, suffix: &str) -> Result<Response, WtiError> {
        let response = self
            .client
            .get(self.connection.endpoint(suffix))
            .basic_auth(self.connection.username(), Some(self.connection.password()))
            .send()?;
        Ok(response)
    }
}

fn decode(response: Response) -> Result<Value, WtiError> {
    let bytes = response.bytes()?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[derive(Debug, Default)]
pub struct WtiClientBuilder {
    url: String,
    path_prefix: String,
    username: String,
    password: String,
    timeout: Option<Duration>,
    self_test: bool,
}

impl WtiClientBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn path_prefix(mut self, path_prefix: impl Into<String>) -> Self {
        self.path_prefix = path_prefix.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Probe the unit as soon as the client is built.
    pub fn self_test(mut self, self_test: bool) -> Self {
        self.self_test = self_test;
        self
    }

    pub fn build(self) -> Result<WtiClient, WtiError> {
        let connection = ConnectionConfig::new(&self.url, &self.path_prefix, &self.username, &self.password);
        let client = WtiClient::with_timeout(connection, self.timeout)?;
        if self.self_test {
            client.self_test()?;
        }
        Ok(client)
    }
}
