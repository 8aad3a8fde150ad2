//! Brand configuration loading
//!
//! A brand config is a single JSON object read from `<config-dir>/<brand>.json`.
//! Loading only checks that the file exists and holds a JSON object; required
//! fields are looked up lazily by the deriver and generator so a missing key
//! surfaces as [`GenerateError::RequiredFieldMissing`] naming that key.

use log::{error, info};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GenerateError, Result};

/// Field holding the human brand name
pub const BRAND_NAME: &str = "brand_name";
/// Field holding the tracked application ids
pub const APP_IDS: &str = "app_ids";
/// Field holding the first date of historical data to model
pub const HISTORICAL_DATA_SINCE: &str = "historical_data_since";
/// Field toggling web tracking ("yes" enables)
pub const WEB_TRACKING: &str = "web_tracking";
/// Field toggling mobile tracking ("yes" enables)
pub const MOBILE_TRACKING: &str = "mobile_tracking";
/// Optional field of variable overrides
pub const USER_SET_VARIABLES: &str = "user_set_variables";

/// A parsed brand configuration document
///
/// Owned by a single generation run and never written back.
#[derive(Debug, Clone)]
pub struct BrandConfig {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl BrandConfig {
    /// Wrap an already-parsed JSON object, remembering where it came from
    pub fn from_map(path: impl Into<PathBuf>, fields: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    /// Path the config was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a required field, failing if it is absent
    pub fn require(&self, field: &'static str) -> Result<&Value> {
        self.fields.get(field).ok_or_else(|| GenerateError::RequiredFieldMissing {
            path: self.path.clone(),
            field,
        })
    }

    /// The brand's display name
    pub fn brand_name(&self) -> Result<&str> {
        self.require(BRAND_NAME)?.as_str().ok_or_else(|| GenerateError::InvalidField {
            path: self.path.clone(),
            field: BRAND_NAME,
            expected: "a string",
        })
    }

    /// Optional variable overrides applied on top of the derived defaults
    pub fn user_set_variables(&self) -> Result<Option<&Map<String, Value>>> {
        match self.fields.get(USER_SET_VARIABLES) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(GenerateError::InvalidField {
                path: self.path.clone(),
                field: USER_SET_VARIABLES,
                expected: "an object",
            }),
        }
    }
}

/// Load and parse a brand config file
///
/// Logs the offending path before returning either failure kind.
pub fn load(path: impl AsRef<Path>) -> Result<BrandConfig> {
    let path = path.as_ref();

    let content = fs::read(path).map_err(|source| {
        error!("Configuration file not found at {}", path.display());
        GenerateError::ConfigNotFound {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let value: Value = serde_json::from_slice(&content).map_err(|e| {
        error!("Invalid JSON in configuration file {}", path.display());
        GenerateError::ConfigMalformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    let Value::Object(fields) = value else {
        error!("Invalid JSON in configuration file {}", path.display());
        return Err(GenerateError::ConfigMalformed {
            path: path.to_path_buf(),
            message: "top-level value must be an object".to_string(),
        });
    };

    info!("Loaded configuration from {}", path.display());
    Ok(BrandConfig::from_map(path, fields))
}
