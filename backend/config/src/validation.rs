//! Config validation with field paths in every message.

use crate::schema::StudyForgeConfig;
use thiserror::Error;

/// Processing delays above this are almost certainly a typo (seconds vs ms).
const MAX_SENSIBLE_PROCESSING_DELAY_MS: u64 = 60_000;

#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

pub fn validate(config: &StudyForgeConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_timings(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_timings(config: &StudyForgeConfig, report: &mut ValidationReport) {
    let Some(t) = &config.timings else { return };

    if t.audio_tick_ms == Some(0) {
        report.error("timings.audioTickMs", "Tick interval must be greater than zero");
    }
    if t.audio_duration_secs == Some(0) {
        report.error("timings.audioDurationSecs", "Audio duration must be greater than zero");
    }
    if let (Some(tick), Some(secs)) = (t.audio_tick_ms, t.audio_duration_secs) {
        if tick > secs.saturating_mul(1000) {
            report.warn(
                "timings.audioTickMs",
                "Tick interval is longer than the audio; playback ends on the first tick",
            );
        }
    }
    if let Some(delay) = t.processing_delay_ms {
        if delay > MAX_SENSIBLE_PROCESSING_DELAY_MS {
            report.warn(
                "timings.processingDelayMs",
                format!("Processing delay of {delay}ms is unusually long"),
            );
        }
    }
}

fn validate_logging(config: &StudyForgeConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if let Some(dir) = &logging.dir {
        if dir.trim().is_empty() {
            report.error("logging.dir", "Log directory cannot be empty; omit it for console only");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::apply_all_defaults;
    use crate::schema::{LoggingConfig, TimingsConfig};

    #[test]
    fn test_defaults_are_valid() {
        let report = validate(&apply_all_defaults(StudyForgeConfig::default()));
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_zero_tick_is_error() {
        let config = StudyForgeConfig {
            timings: Some(TimingsConfig {
                audio_tick_ms: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&config);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "timings.audioTickMs");
    }

    #[test]
    fn test_long_tick_and_delay_warn() {
        let config = StudyForgeConfig {
            timings: Some(TimingsConfig {
                audio_tick_ms: Some(5000),
                audio_duration_secs: Some(2),
                processing_delay_ms: Some(120_000),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_huge_duration_does_not_overflow() {
        let config = StudyForgeConfig {
            timings: Some(TimingsConfig {
                audio_tick_ms: Some(500),
                audio_duration_secs: Some(u64::MAX / 10),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&config);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_blank_log_dir_is_error() {
        let config = StudyForgeConfig {
            logging: Some(LoggingConfig {
                dir: Some("  ".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(!validate(&config).is_valid());
    }
}
