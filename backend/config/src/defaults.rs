//! Config defaults: the schedule the demo page runs on.

use crate::schema::{LoggingConfig, StudyForgeConfig, TimingsConfig, UploadConfig};

pub const DEFAULT_PROCESSING_DELAY_MS: u64 = 2000;
pub const DEFAULT_AUDIO_ARM_DELAY_MS: u64 = 1500;
pub const DEFAULT_AUDIO_TICK_MS: u64 = 500;
pub const DEFAULT_AUDIO_DURATION_SECS: u64 = 30;
pub const DEFAULT_TOAST_FADE_IN_MS: u64 = 100;
pub const DEFAULT_TOAST_DISMISS_AFTER_MS: u64 = 3000;
pub const DEFAULT_TOAST_FADE_OUT_MS: u64 = 300;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: StudyForgeConfig) -> StudyForgeConfig {
    let config = apply_timing_defaults(config);
    let config = apply_logging_defaults(config);
    apply_upload_defaults(config)
}

fn apply_timing_defaults(mut config: StudyForgeConfig) -> StudyForgeConfig {
    let t = config.timings.get_or_insert_with(TimingsConfig::default);
    t.processing_delay_ms.get_or_insert(DEFAULT_PROCESSING_DELAY_MS);
    t.audio_arm_delay_ms.get_or_insert(DEFAULT_AUDIO_ARM_DELAY_MS);
    t.audio_tick_ms.get_or_insert(DEFAULT_AUDIO_TICK_MS);
    t.audio_duration_secs.get_or_insert(DEFAULT_AUDIO_DURATION_SECS);
    t.toast_fade_in_ms.get_or_insert(DEFAULT_TOAST_FADE_IN_MS);
    t.toast_dismiss_after_ms.get_or_insert(DEFAULT_TOAST_DISMISS_AFTER_MS);
    t.toast_fade_out_ms.get_or_insert(DEFAULT_TOAST_FADE_OUT_MS);
    config
}

fn apply_logging_defaults(mut config: StudyForgeConfig) -> StudyForgeConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    logging.json.get_or_insert(false);
    config
}

fn apply_upload_defaults(mut config: StudyForgeConfig) -> StudyForgeConfig {
    let upload = config.upload.get_or_insert_with(UploadConfig::default);
    upload.reject_while_processing.get_or_insert(true);
    config
}
