mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use proofstudio_gemini::GeminiClient;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = proofstudio_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, model = %config.gemini_model, "starting proofstudio-server");

    let gemini = match config.gemini_api_key.as_deref() {
        Some(key) => Some(Arc::new(GeminiClient::new(
            key,
            &config.gemini_model,
            &config.target_locale,
            config.gemini_timeout_secs,
        )?)),
        None => {
            tracing::warn!(
                "GEMINI_API_KEY not set; /api/generate-reviews will answer with a \
                 configuration error until it is configured"
            );
            None
        }
    };

    let app = build_app(AppState { gemini });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
