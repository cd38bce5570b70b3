//! Gateway entry point: config from `.env`, sled-backed counter, one shared
//! interpreter, optional keep-alive pinger.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tagbridge_core::{ExecutionGateway, GatewayConfig, UsageCounter};
use tagbridge_engine::Interpreter;
use tagbridge_gateway::{build_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env();

    let db = sled::open(&config.data_path).expect("open usage store");
    let counter =
        Arc::new(UsageCounter::open(&db, &config.counter_namespace).expect("open counter tree"));

    let state = AppState {
        gateway: Arc::new(ExecutionGateway::new(
            Interpreter::with_default_blocks(),
            config.execution_timeout(),
        )),
        counter,
        counter_key: config.counter_key.clone(),
    };

    if let Some(url) = config.keepalive_url.clone() {
        tokio::spawn(keep_alive(url));
    }

    let app = build_app(state, &config.allowed_origins);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("bind listener");
    tracing::info!("tagbridge gateway listening on {}", config.bind_addr);
    axum::serve(listener, app).await.expect("serve");
}

/// Pings the configured URL on a jittered interval so free-tier hosts keep
/// the process warm. Never blocks or shares state with request handling.
async fn keep_alive(url: String) {
    let client = reqwest::Client::new();
    loop {
        let wait = rand::thread_rng().gen_range(50..=100);
        tokio::time::sleep(Duration::from_secs(wait)).await;
        match client.get(&url).send().await {
            Ok(response) => tracing::debug!("keep-alive ping: {}", response.status()),
            Err(e) => tracing::warn!("keep-alive ping failed: {e}"),
        }
    }
}
