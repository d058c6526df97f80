mod console;
mod demo;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use studyforge_config::{
    config_dir, config_file_path, load_and_prepare, write_config, PreparedConfig,
};
use studyforge_core::FileUpload;
use studyforge_notify::ToastEvent;
use studyforge_session::{SessionActor, SessionConfig, SessionHandle};

#[derive(Parser)]
#[command(name = "studyforge")]
#[command(about = "StudyForge: a simulated document learning assistant")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.studyforge/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level, overriding the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full upload-to-playback flow once
    Demo {
        /// File name to "upload"; it picks the canned topic
        #[arg(short, long, default_value = "machine_learning_intro.pdf")]
        file: String,
        /// Declared MIME type (guessed from the extension when omitted)
        #[arg(short, long)]
        mime: Option<String>,
    },
    /// Drive a session interactively from stdin
    Console,
    /// Print the effective configuration as JSON
    Config {
        /// Persist the effective configuration to the config file
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let PreparedConfig { config, warnings } = load_and_prepare(&path).await?;

    let logging = config.logging.clone().unwrap_or_default();
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level().to_string());
    studyforge_logging::init_logger(
        logging.dir.as_deref().map(std::path::Path::new),
        &level,
        logging.json.unwrap_or(false),
    );
    debug!(path = %path.display(), "Configuration loaded");
    for warning in &warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }

    match cli.command {
        Commands::Demo { file, mime } => {
            let mime = mime.unwrap_or_else(|| console::guess_mime(&file).to_string());
            let handle = start_session(SessionConfig::from(&config));
            demo::run(handle, FileUpload::new(file, mime), config.timings()).await?;
        }
        Commands::Console => {
            let handle = start_session(SessionConfig::from(&config));
            console::run(handle).await?;
        }
        Commands::Config { write } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if write {
                write_config(&config, &path).await?;
                println!("wrote {}", path.display());
            }
        }
    }

    Ok(())
}

/// Spawn the session and echo every new toast to stdout.
fn start_session(config: SessionConfig) -> SessionHandle {
    let handle = SessionActor::spawn(config);
    info!(session_id = %handle.session_id(), "Session ready");

    let mut toasts = handle.subscribe();
    let color = render::supports_color();
    tokio::spawn(async move {
        loop {
            match toasts.recv().await {
                Ok(ToastEvent::Shown(n)) => println!("{}", render::toast_line(&n, color)),
                Ok(_) => {}
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Toast printer lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    handle
}
