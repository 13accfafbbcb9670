//! Field extraction from the JSON bodies returned by the unit. Every function takes the whole
//! response body and picks the fields of one endpoint out of it.
use crate::wti::domain::{BranchReading, FirmwareVersion, Temperature};
use serde_json::{Number, Value};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ExtractError {
    #[error("missing key '{path}'")]
    MissingKey { path: String },
    #[error("expected '{path}' to be {expected}")]
    UnexpectedType { path: String, expected: &'static str },
}

/// Follows `path` through nested objects and returns the value at its end.
pub fn lookup<'a>(body: &'a Value, path: &[&str]) -> Result<&'a Value, ExtractError> {
    let mut current = body;
    for (depth, key) in path.iter().enumerate() {
        let object = current.as_object().ok_or_else(|| ExtractError::UnexpectedType {
            path: join(&path[..depth]),
            expected: "an object",
        })?;
        current = object.get(*key).ok_or_else(|| ExtractError::MissingKey { path: join(&path[..=depth]) })?;
    }
    Ok(current)
}

pub fn temperature(body: &Value, no_format: bool) -> Result<Temperature, ExtractError> {
    let value = lookup(body, &["temperature"])?;
    let format = lookup(body, &["format"])?;

    if no_format {
        Ok(Temperature::Degrees(as_integer(value, "temperature")?))
    } else {
        Ok(Temperature::Formatted(format!("{}{}", as_text(value, "temperature")?, as_text(format, "format")?)))
    }
}

pub fn alarms(body: &Value) -> Result<Vec<Value>, ExtractError> {
    lookup(body, &["alarms"])?
        .as_array()
        .cloned()
        .ok_or_else(|| unexpected("alarms", "an array"))
}

pub fn hostname(body: &Value) -> Result<String, ExtractError> {
    as_string(lookup(body, &["unitid", "hostname"])?, "unitid.hostname")
}

pub fn location(body: &Value) -> Result<String, ExtractError> {
    as_string(lookup(body, &["unitid", "location"])?, "unitid.location")
}

pub fn current(body: &Value) -> Result<Vec<BranchReading>, ExtractError> {
    branch_values(body, "current1")
}

pub fn voltage(body: &Value) -> Result<Vec<BranchReading>, ExtractError> {
    branch_values(body, "voltage1")
}

/// Reads `field` from `branch0` up to `branchcount - 1`, in index order. A negative count
/// yields no readings.
fn branch_values(body: &Value, field: &str) -> Result<Vec<BranchReading>, ExtractError> {
    let count = lookup(body, &["branchcount"])?
        .as_i64()
        .ok_or_else(|| unexpected("branchcount", "an integer"))?;

    (0..count.max(0) as u64)
        .map(|index| {
            let branch = format!("branch{}", index);
            let value = lookup(body, &[branch.as_str(), field])?;
            Ok(BranchReading::new(index, value.clone()))
        })
        .collect()
}

/// Voltage times current of `branch1`, whatever the branch count is.
pub fn wattage(body: &Value) -> Result<Number, ExtractError> {
    let volts = lookup(body, &["branch1", "voltage1"])?;
    let amps = lookup(body, &["branch1", "current1"])?;

    if let Some(watts) = volts.as_i64().zip(amps.as_i64()).and_then(|(v, a)| v.checked_mul(a)) {
        return Ok(Number::from(watts));
    }

    let volts = volts.as_f64().ok_or_else(|| unexpected("branch1.voltage1", "a number"))?;
    let amps = amps.as_f64().ok_or_else(|| unexpected("branch1.current1", "a number"))?;
    Number::from_f64(volts * amps).ok_or_else(|| unexpected("branch1", "a finite product"))
}

pub fn firmware_version(body: &Value) -> Result<Vec<FirmwareVersion>, ExtractError> {
    Ok(vec![FirmwareVersion {
        firmware: as_string(lookup(body, &["config", "firmware"])?, "config.firmware")?,
        family: as_string(lookup(body, &["config", "family"])?, "config.family")?,
    }])
}

/// The `status.code` reported by the firmware endpoint, `None` if the key is absent.
pub fn status_code(body: &Value) -> Result<Option<i64>, ExtractError> {
    match lookup(body, &["status", "code"]) {
        Ok(code) => as_integer(code, "status.code").map(Some),
        Err(ExtractError::MissingKey { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Integers pass through, floats are truncated and strings are parsed.
fn as_integer(value: &Value, path: &str) -> Result<i64, ExtractError> {
    let integer = match value {
        // Saturates outside the i64 range.
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    integer.ok_or_else(|| unexpected(path, "an integer"))
}

fn as_text(value: &Value, path: &str) -> Result<String, ExtractError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(unexpected(path, "a string or a number")),
    }
}

fn as_string(value: &Value, path: &str) -> Result<String, ExtractError> {
    value.as_str().map(str::to_string).ok_or_else(|| unexpected(path, "a string"))
}

fn unexpected(path: &str, expected: &'static str) -> ExtractError {
    ExtractError::UnexpectedType {
        path: path.to_string(),
        expected,
    }
}

fn join(path: &[&str]) -> String {
    path.join(".")
}
