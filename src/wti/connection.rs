use std::fmt::{Display, Formatter};
use std::mem;

pub const DEFAULT_URL: &str = "https://rest.wti.com/";
pub const DEFAULT_PATH_PREFIX: &str = "api/v2/";
pub const DEFAULT_USERNAME: &str = "restpowerpublic";
pub const DEFAULT_PASSWORD: &str = "restfulpassword";

/// Where and as whom requests are sent. Every request goes to `url + path_prefix + suffix`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionConfig {
    url: String,
    path_prefix: String,
    username: String,
    password: String,
}

impl ConnectionConfig {
    /// Creates a new configuration, any empty value falls back to its default.
    pub fn new(url: &str, path_prefix: &str, username: &str, password: &str) -> Self {
        ConnectionConfig {
            url: or_default(url, DEFAULT_URL),
            path_prefix: or_default(path_prefix, DEFAULT_PATH_PREFIX),
            username: or_default(username, DEFAULT_USERNAME),
            password: or_default(password, DEFAULT_PASSWORD),
        }
    }

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

    /// Returns the request target for `suffix`. Plain concatenation, slashes are not normalized.
    pub fn endpoint(&self, suffix: &str) -> String {
        format!("{}{}{}", self.url, self.path_prefix, suffix)
    }

    /// Replaces the base URL and returns the previous one.
    pub fn set_url(&mut self, url: impl Into<String>) -> String {
        mem::replace(&mut self.url, url.into())
    }

    /// Replaces the path prefix and returns the previous one.
    pub fn set_path_prefix(&mut self, path_prefix: impl Into<String>) -> String {
        mem::replace(&mut self.path_prefix, path_prefix.into())
    }

    /// Replaces the username and returns the previous one.
    pub fn set_username(&mut self, username: impl Into<String>) -> String {
        mem::replace(&mut self.username, username.into())
    }

    /// Replaces the password and returns the previous one.
    pub fn set_password(&mut self, password: impl Into<String>) -> String {
        mem::replace(&mut self.password, password.into())
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig::new("", "", "", "")
    }
}

impl Display for ConnectionConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "URL: {}", self.url)?;
        writeln!(f, "URL EXTRAS: {}", self.path_prefix)?;
        writeln!(f, "USERNAME: {}", self.username)?;
        write!(f, "PASSWORD: {}", self.password)
    }
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() { default.to_string() } else { value.to_string() }
}
