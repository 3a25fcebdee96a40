//! Petalscope: Iris species prediction in the terminal
//!
//! Main entry point for the terminal application.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use petalscope::application::InferenceService;
use petalscope::config::AppConfig;
use petalscope::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env();

    // Writing logs to the terminal would corrupt the TUI (alternate screen),
    // so interactive sessions log to a file unless told otherwise.
    let interactive = std::io::stdout().is_terminal();
    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)
            .with_context(|| format!("Failed to open log file {:?}", config.log_file))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    tracing::info!("Starting Petalscope...");

    // Load the model before touching the terminal so a failure prints plainly.
    let service = InferenceService::init(&config.model_path, config.require_manifest)
        .map_err(|e| {
            tracing::error!("{}", e);
            e
        })
        .with_context(|| {
            format!(
                "Cannot start without a model at {:?} (set PETALSCOPE_MODEL_PATH)",
                config.model_path
            )
        })?;

    let mut app = App::new(service);
    app.run()?;

    tracing::info!("Petalscope shutdown complete.");
    Ok(())
}
