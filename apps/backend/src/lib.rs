pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use anyhow::Context;
use bahasa_core::{MorphologyContext, RootDictionary, RuleTable, StudySettings};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::store::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<MorphologyContext>,
    pub store: Arc<Store>,
}

impl AppState {
    pub fn new(ctx: MorphologyContext, settings: StudySettings) -> Self {
        Self {
            ctx: Arc::new(ctx),
            store: Arc::new(Store::new(settings)),
        }
    }

    /// Build the analyzer context and an empty store from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut dictionary = RootDictionary::indonesian();
        if let Some(path) = &config.dictionary_path {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read dictionary {}", path.display()))?;
            dictionary.extend_from_text(&text);
            tracing::info!("Loaded extra roots from {}", path.display());
        }
        tracing::info!("Root dictionary has {} entries", dictionary.len());

        let ctx = MorphologyContext::new(RuleTable::indonesian(), dictionary);
        Ok(Self::new(ctx, config.settings.clone()))
    }
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;

    let app = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
