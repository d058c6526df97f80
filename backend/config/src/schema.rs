//! StudyForge configuration schema.
//!
//! Every field is optional on disk; `defaults::apply_all_defaults` fills the
//! gaps and [`StudyForgeConfig::timings`] resolves the concrete schedule.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::defaults::{
    DEFAULT_AUDIO_ARM_DELAY_MS, DEFAULT_AUDIO_DURATION_SECS, DEFAULT_AUDIO_TICK_MS,
    DEFAULT_PROCESSING_DELAY_MS, DEFAULT_TOAST_DISMISS_AFTER_MS, DEFAULT_TOAST_FADE_IN_MS,
    DEFAULT_TOAST_FADE_OUT_MS,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyForgeConfig {
    /// Simulated processing, audio, and toast schedules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timings: Option<TimingsConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    /// Upload controller behaviour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<UploadConfig>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimingsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_arm_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_tick_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_duration_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toast_fade_in_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toast_dismiss_after_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toast_fade_out_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for the rolling NDJSON log; console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfig {
    /// Refuse a new upload while one is processing (otherwise restart).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_while_processing: Option<bool>,
}

// ---------------------------------------------------------------------------
// Resolved values
// ---------------------------------------------------------------------------

/// Concrete schedule used by the session, notifier, and audio simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub processing_delay: Duration,
    pub audio_arm_delay: Duration,
    pub audio_tick: Duration,
    pub audio_duration: Duration,
    pub toast_fade_in: Duration,
    pub toast_dismiss_after: Duration,
    pub toast_fade_out: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(DEFAULT_PROCESSING_DELAY_MS),
            audio_arm_delay: Duration::from_millis(DEFAULT_AUDIO_ARM_DELAY_MS),
            audio_tick: Duration::from_millis(DEFAULT_AUDIO_TICK_MS),
            audio_duration: Duration::from_secs(DEFAULT_AUDIO_DURATION_SECS),
            toast_fade_in: Duration::from_millis(DEFAULT_TOAST_FADE_IN_MS),
            toast_dismiss_after: Duration::from_millis(DEFAULT_TOAST_DISMISS_AFTER_MS),
            toast_fade_out: Duration::from_millis(DEFAULT_TOAST_FADE_OUT_MS),
        }
    }
}

impl StudyForgeConfig {
    pub fn timings(&self) -> Timings {
        let defaults = Timings::default();
        let Some(t) = &self.timings else {
            return defaults;
        };
        let ms = |v: Option<u64>, fallback: Duration| {
            v.map(Duration::from_millis).unwrap_or(fallback)
        };
        Timings {
            processing_delay: ms(t.processing_delay_ms, defaults.processing_delay),
            audio_arm_delay: ms(t.audio_arm_delay_ms, defaults.audio_arm_delay),
            audio_tick: ms(t.audio_tick_ms, defaults.audio_tick),
            audio_duration: t
                .audio_duration_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.audio_duration),
            toast_fade_in: ms(t.toast_fade_in_ms, defaults.toast_fade_in),
            toast_dismiss_after: ms(t.toast_dismiss_after_ms, defaults.toast_dismiss_after),
            toast_fade_out: ms(t.toast_fade_out_ms, defaults.toast_fade_out),
        }
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn reject_while_processing(&self) -> bool {
        self.upload
            .as_ref()
            .and_then(|u| u.reject_while_processing)
            .unwrap_or(true)
    }
}
