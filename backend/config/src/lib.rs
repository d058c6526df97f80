//! `studyforge-config`: runtime configuration for the StudyForge session.
//!
//! Provides:
//! - Typed config schema (timings, logging, upload policy)
//! - YAML read/write
//! - `${ENV_VAR}` substitution and `STUDYFORGE_*` overrides
//! - Default value application
//! - Validation with field paths

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use schema::{StudyForgeConfig, Timings};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

/// A validated config plus the warnings raised while validating it.
///
/// Warnings are returned rather than logged so callers can report them
/// once their subscriber is installed.
#[derive(Debug)]
pub struct PreparedConfig {
    pub config: StudyForgeConfig,
    pub warnings: Vec<ConfigValidationError>,
}

/// Load, substitute env vars, apply defaults and overrides, then validate.
///
/// Any validation error aborts the load with every error in the message.
pub async fn load_and_prepare(path: &Path) -> Result<PreparedConfig> {
    let raw_config = load_config(path).await?;

    let value: Value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;

    let config: StudyForgeConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let config = apply_all_defaults(config);
    let (config, mut warnings) = apply_env_overrides(config, &std::env::vars().collect());

    let report = validate(&config);
    if !report.is_valid() {
        let errors: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
        bail!("Invalid config at {}: {}", path.display(), errors.join("; "));
    }

    warnings.extend(report.warnings);
    Ok(PreparedConfig { config, warnings })
}
