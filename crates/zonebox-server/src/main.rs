use std::env;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zonebox_core::ProviderSettings;
use zonebox_interpret::Interpreter;
use zonebox_server::{app, AppState};

const DEFAULT_BIND: &str = "127.0.0.1:3000";

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("ZONEBOX_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; the real environment may carry everything.
    dotenv::dotenv().ok();
    init_tracing();

    let settings = ProviderSettings::load()?;
    let interpreter = Interpreter::from_settings(&settings);
    if interpreter.is_configured() {
        tracing::info!(
            provider = %settings.provider,
            model = %settings.model,
            "provider configured"
        );
    } else {
        tracing::warn!(
            "{} is not set; /api/interpret will answer 500 until it is",
            settings.missing().unwrap_or_default()
        );
    }

    let state = AppState::new(interpreter);
    let bind = env::var("ZONEBOX_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = TcpListener::bind(&bind).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
