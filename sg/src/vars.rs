//! Derivation of dbt project variables from a brand config

use serde_json::Value;
use std::collections::BTreeMap;

use crate::brand::{APP_IDS, BrandConfig, HISTORICAL_DATA_SINCE, MOBILE_TRACKING, WEB_TRACKING};
use crate::error::Result;

pub const APP_IDS_VAR: &str = "snowplow__app_ids";
pub const START_DATE_VAR: &str = "snowplow__start_date";
pub const ENABLE_WEB_VAR: &str = "snowplow__enable_web";
pub const ENABLE_MOBILE_VAR: &str = "snowplow__enable_mobile";

/// Flattened variable block written under `vars:` in dbt_project.yml
///
/// Keys are kept sorted so the rendered YAML is stable across runs.
pub type DerivedVars = BTreeMap<String, Value>;

/// True only for the exact string "yes"
pub fn is_enabled(value: &Value) -> bool {
    value.as_str() == Some("yes")
}

/// Build the variable block for a brand
///
/// User overrides are applied last, key by key, so they win on collision.
pub fn derive(config: &BrandConfig) -> Result<DerivedVars> {
    let mut vars = DerivedVars::new();
    vars.insert(APP_IDS_VAR.to_string(), config.require(APP_IDS)?.clone());
    vars.insert(START_DATE_VAR.to_string(), config.require(HISTORICAL_DATA_SINCE)?.clone());
    vars.insert(
        ENABLE_WEB_VAR.to_string(),
        Value::Bool(is_enabled(config.require(WEB_TRACKING)?)),
    );
    vars.insert(
        ENABLE_MOBILE_VAR.to_string(),
        Value::Bool(is_enabled(config.require(MOBILE_TRACKING)?)),
    );

    if let Some(overrides) = config.user_set_variables()? {
        for (key, value) in overrides {
            vars.insert(key.clone(), value.clone());
        }
    }

    Ok(vars)
}
