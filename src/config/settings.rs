//! Protocol driver named settings
//!
//! Protocol drivers are configured through typed key/value bags. A setting
//! carries either a string or an integer value; the accessors enforce the
//! expected type and fall back to a default when the setting is absent.

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A single typed key/value setting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedSetting {
    /// Setting name
    pub name: String,
    /// String payload, mutually exclusive with `int_value`
    #[serde(default)]
    pub string_value: Option<String>,
    /// Integer payload, mutually exclusive with `string_value`
    #[serde(default)]
    pub int_value: Option<i64>,
}

/// A named bag of settings configuring one protocol driver
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtocolDriverOptions {
    /// Bag name, referenced by services
    pub name: String,
    /// Driver settings
    #[serde(default)]
    pub settings: Vec<NamedSetting>,
}

/// Fetch a string setting, falling back to `default_value` when absent
///
/// A setting that exists with an integer payload is a configuration error.
pub fn get_string_setting(
    settings: &[NamedSetting],
    name: &str,
    default_value: &str,
) -> Result<String> {
    for setting in settings {
        if setting.name != name {
            continue;
        }
        if setting.int_value.is_some() {
            bail!("Setting '{}' must have a string value.", name);
        }
        match &setting.string_value {
            Some(value) => return Ok(value.clone()),
            None => bail!("Setting '{}' has no value.", name),
        }
    }
    Ok(default_value.to_string())
}

/// Fetch an integer setting, falling back to `default_value` when absent
///
/// A setting that exists with a string payload is a configuration error.
pub fn get_int_setting(settings: &[NamedSetting], name: &str, default_value: i64) -> Result<i64> {
    for setting in settings {
        if setting.name != name {
            continue;
        }
        if setting.string_value.is_some() {
            bail!("Setting '{}' must have an integer value.", name);
        }
        match setting.int_value {
            Some(value) => return Ok(value),
            None => bail!("Setting '{}' has no value.", name),
        }
    }
    Ok(default_value)
}
