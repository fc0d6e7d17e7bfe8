use std::sync::Arc;

use anyhow::Context;

use labsite::api::routes::build_router;
use labsite::auth::verifier::{StaticTokenVerifier, TokenVerifier};
use labsite::config::AppConfig;
use labsite::db::repository::{MongoResourceStore, ResourceStore};
use labsite::db::store::DocumentStore;
use labsite::seeder;
use labsite::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labsite=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting labsite server...");

    let config = AppConfig::from_env();

    // Connect to MongoDB (single client for the process lifetime)
    let store = DocumentStore::connect(&config.mongodb_uri)
        .await
        .context("failed to connect to MongoDB")?;
    tracing::info!("Connected to MongoDB at {}", config.mongodb_uri);

    let resources: Arc<dyn ResourceStore> = Arc::new(MongoResourceStore::new(store));
    let verifier: Arc<dyn TokenVerifier> = Arc::new(StaticTokenVerifier::new(
        config.admin_token.clone(),
        config.subadmin_token.clone(),
    ));

    if config.seed_demo {
        seeder::seed_demo_data(resources.as_ref()).await;
    }

    let state = AppState {
        resources,
        verifier,
    };
    let app = build_router(state);

    tracing::info!("Listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("failed to bind listen address")?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
