//! medpredict: predictive disease detection
//!
//! Main entry point for the terminal application.

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medpredict::adapters::sanitize::SanitizingMakeWriter;
use medpredict::adapters::{InMemoryCredentialStore, ModelSet};
use medpredict::application::{AuthService, PredictionDispatcher, Workflow};
use medpredict::config::AppConfig;
use medpredict::tui::App;
use medpredict::MedPredictError;

fn main() -> Result<()> {
    let config = AppConfig::from_env().map_err(MedPredictError::from)?;

    // Writing logs to the terminal would corrupt the TUI (alternate screen),
    // so an interactive run logs to a file unless told otherwise.
    let interactive = std::io::stdout().is_terminal();

    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            // don't fail startup just because the directory is missing
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
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting medpredict...");

    // Refuse to start without every classifier.
    let models = ModelSet::load(&config.model_dir)
        .map_err(MedPredictError::from)
        .with_context(|| format!("Failed to load models from {:?}", config.model_dir))?;

    let store = Arc::new(InMemoryCredentialStore::new());
    let auth = AuthService::new(store);
    let dispatcher = PredictionDispatcher::new(models.diabetes, models.heart_disease);

    let mut app = App::new(Workflow::new(auth, dispatcher));
    app.run()?;

    tracing::info!("medpredict shutdown complete.");
    Ok(())
}
