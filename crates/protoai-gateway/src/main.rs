//! ProtoAI Gateway — POST /generate turns a business idea into a website blueprint.
//! One hosted text-generation call per request; failures degrade to template copy.

mod app;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use protoai_core::{config::TOKEN_ENV, GatewayConfig, HuggingFaceClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{build_app, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[protoai-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "[PROTOAI] gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = GatewayConfig::load()?;

    let generator = HuggingFaceClient::new(
        config.model_url.clone(),
        config.hf_token.clone(),
        config.generation_timeout(),
    );
    if !generator.has_credential() {
        tracing::warn!(
            "[PROTOAI] {} not set; blueprints will use template copy only",
            TOKEN_ENV
        );
    }

    let state = AppState {
        generator: Arc::new(generator),
        max_idea_chars: config.max_idea_chars,
    };
    let app = build_app(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        model = %config.model_url,
        "[PROTOAI] gateway listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("[PROTOAI] gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "[PROTOAI] could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
