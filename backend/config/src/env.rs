//! Environment handling for config values.
//!
//! String leaves may reference `${VAR_NAME}` (uppercase names only), resolved
//! at load time; `$${VAR}` stays as the literal `${VAR}`. A handful of
//! `STUDYFORGE_*` variables override fields after defaults are applied.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{LoggingConfig, StudyForgeConfig, TimingsConfig};
use crate::validation::ConfigValidationError;

/// `${VAR}` with an optional extra leading `$` marking an escape.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

pub const ENV_LOG_LEVEL: &str = "STUDYFORGE_LOG_LEVEL";
pub const ENV_PROCESSING_DELAY_MS: &str = "STUDYFORGE_PROCESSING_DELAY_MS";

#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references using the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_string(s, env, path)?)),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                let child = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                out.insert(k.clone(), substitute_value(v, env, &child)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains('$') {
        return Ok(s.to_string());
    }

    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for caps in ENV_VAR_PATTERN.captures_iter(s) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&s[last..whole.start()]);
        last = whole.end();

        let name = &caps[2];
        if !caps[1].is_empty() {
            out.push_str(&format!("${{{name}}}"));
            continue;
        }
        match env.get(name) {
            Some(val) if !val.is_empty() => out.push_str(val),
            _ => bail!(MissingEnvVarError {
                var_name: name.to_string(),
                config_path: path.to_string(),
            }),
        }
    }
    out.push_str(&s[last..]);
    Ok(out)
}

/// Apply `STUDYFORGE_*` overrides.
///
/// Unparseable values are skipped and come back as warnings.
pub fn apply_env_overrides(
    mut config: StudyForgeConfig,
    env: &HashMap<String, String>,
) -> (StudyForgeConfig, Vec<ConfigValidationError>) {
    let mut warnings = Vec::new();

    if let Some(level) = env.get(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
        config
            .logging
            .get_or_insert_with(LoggingConfig::default)
            .level = Some(level.trim().to_string());
    }

    if let Some(raw) = env.get(ENV_PROCESSING_DELAY_MS) {
        match raw.trim().parse::<u64>() {
            Ok(ms) => {
                config
                    .timings
                    .get_or_insert_with(TimingsConfig::default)
                    .processing_delay_ms = Some(ms);
            }
            Err(e) => warnings.push(ConfigValidationError {
                path: ENV_PROCESSING_DELAY_MS.to_string(),
                message: format!("Ignoring invalid override '{raw}': {e}"),
            }),
        }
    }

    (config, warnings)
}
