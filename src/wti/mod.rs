mod client;
mod connection;
mod domain;
pub mod extract;

pub use client::{WtiClient, WtiClientBuilder, WtiError, new_http_client};
pub use connection::{ConnectionConfig, DEFAULT_PASSWORD, DEFAULT_PATH_PREFIX, DEFAULT_URL, DEFAULT_USERNAME};
pub use domain::{BranchReading, FirmwareVersion, SelfTestOutcome, Temperature};
pub use extract::ExtractError;
