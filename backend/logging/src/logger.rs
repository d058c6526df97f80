//! Structured Logger
//!
//! Wraps `tracing` with an env-controlled filter, a console layer (plain or
//! JSON), and an optional rolling NDJSON file layer.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "studyforge.log";

/// Initialize the global logger. `RUST_LOG` wins over `level` when set.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger(log_dir: Option<&Path>, level: &str, json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Writes `studyforge.log.YYYY-MM-DD`
    let file_layer = log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        fmt::layer().json().with_writer(appender).with_ansi(false)
    });

    let console_json = json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
    });
    let console_plain = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_json)
        .with(console_plain)
        .with(file_layer)
        .try_init();
}
