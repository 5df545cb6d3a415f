use crate::frameworks::config::Config;
use crate::interface_adapters::clients::BackendClient;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::storage::FileTokenStore;
use crate::interface_adapters::terminal::Shell;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;

fn init_tracing() {
    // The terminal belongs to the shell, so stay quiet unless asked.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// `start` is the first path to navigate to, e.g. "/" or "/chat".
pub async fn run(start: &str) -> ExitCode {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(
        api_base_url = %config.api_base_url,
        timeout = ?config.request_timeout,
        session_file = %config.session_file.display(),
        "client configured."
    );

    let backend = match BackendClient::new(config.api_base_url, config.request_timeout) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error = %e, "failed to build http client");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState {
        auth: backend.clone(),
        chat: backend,
        store: Arc::new(FileTokenStore::new(config.session_file)),
    };

    let mut shell = Shell::new(
        state,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .cancel_on_ctrl_c();

    // Report I/O errors rather than panicking.
    if let Err(e) = shell.run(start).await {
        tracing::error!(error = %e, "terminal error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
