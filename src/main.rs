use std::path::Path;
use std::sync::Arc;

use scancore::compose::compose;
use scancore::home;
use scancore::properties::ConfigStore;
use scancore::status_view::BroadcastStatusView;
use scancore::AppResult;

const LOG_TARGET_STARTUP: &str = "scancore::startup";

/// Initialize tracing with file rotation
///
/// Logs are written to `<home>/logs` with daily rotation when the home
/// directory is available, and to the console otherwise.
fn initialize_tracing(home: Option<&Path>) {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match home {
        Some(home) => {
            let log_dir = home.join("logs");
            if let Err(e) = std::fs::create_dir_all(&log_dir) {
                eprintln!("Warning: Failed to create log directory: {}", e);
            }

            let file_appender = rolling::daily(&log_dir, "scancore.log");

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stdout))
                .with(fmt::layer().with_writer(file_appender).with_ansi(false))
                .init();

            tracing::info!("Log directory: {}", log_dir.display());
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stdout))
                .init();
        }
    }
}

fn main() -> AppResult<()> {
    // Setup the application home directory before logging so the file
    // appender can live inside it.
    let home_path = home::resolve();

    initialize_tracing(home_path.as_deref());

    let version = env!("CARGO_PKG_VERSION");
    tracing::info!(target: LOG_TARGET_STARTUP, "Starting ScanCore v{}", version);
    match &home_path {
        Some(path) => tracing::info!(target: LOG_TARGET_STARTUP, "Home path: {}", path.display()),
        None => tracing::warn!(
            target: LOG_TARGET_STARTUP,
            "No home directory, settings will not persist"
        ),
    }

    // Load the properties file, creating it on first run
    let config = match &home_path {
        Some(path) => Arc::new(ConfigStore::load(&home::properties_path(path))),
        None => Arc::new(ConfigStore::in_memory()),
    };
    config.log_current_settings();

    // Construct and wire the full component graph. A failure here is fatal:
    // no partially initialized application is presented.
    let graph = compose(Arc::clone(&config), home_path)?;

    let status_view = BroadcastStatusView::new(
        Arc::clone(&config),
        Box::new(|visibility| tracing::info!("Streaming status panel now {:?}", visibility)),
    );

    tracing::info!(
        target: LOG_TARGET_STARTUP,
        "Composed {} components; {} channels, {} tuners, status panel {:?}",
        graph.ledger().entries().len(),
        graph.channel_model.len(),
        graph.tuner_model.tuner_count(),
        status_view.visibility()
    );

    // Hand-off point: the presentation layer takes the graph from here.
    graph.tuner_model.request_first_tuner_display();
    tracing::info!("{}", graph.window_title.current());

    graph.recorder.shutdown();
    Ok(())
}
