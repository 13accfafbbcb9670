use reqwest::StatusCode;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// A temperature reading, either the bare number or the number followed by its unit (`72F`).
#[derive(Clone, Debug, PartialEq)]
pub enum Temperature {
    Degrees(i64),
    Formatted(String),
}

impl Display for Temperature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Temperature::Degrees(degrees) => write!(f, "{}", degrees),
            Temperature::Formatted(text) => write!(f, "{}", text),
        }
    }
}

/// A single value read from one branch, serialized as `{"branch<i>": value}`.
#[derive(Clone, Debug, PartialEq)]
pub struct BranchReading {
    pub branch: String,
    pub value: Value,
}

impl BranchReading {
    pub fn new(index: u64, value: Value) -> Self {
        BranchReading {
            branch: format!("branch{}", index),
            value,
        }
    }
}

impl Serialize for BranchReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.branch, &self.value)?;
        map.end()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FirmwareVersion {
    pub firmware: String,
    pub family: String,
}

/// What the self-test probe found out about the unit.
#[derive(Clone, Debug, PartialEq)]
pub enum SelfTestOutcome {
    /// The unit answered with something other than 200 OK.
    ConnectionError { status: StatusCode },
    /// The unit answered, but the body has no `status.code`.
    StatusCodeMissing { body: Value },
    Passed,
    /// The unit reported a non-zero status code. Not reported, only returned.
    Accepted { code: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn branch_reading_serializes_as_a_single_key_map() {
        let reading = BranchReading::new(3, json!(1.5));

        assert_eq!(serde_json::to_value(&reading).unwrap(), json!({"branch3": 1.5}));
    }

    #[test]
    fn temperature_displays_its_value() {
        assert_eq!(Temperature::Degrees(72).to_string(), "72");
        assert_eq!(Temperature::Formatted("72F".to_string()).to_string(), "72F");
    }
}
