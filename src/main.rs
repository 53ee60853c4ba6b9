use movies_api::{ApiServer, AppState, Config, MovieStore, Schema};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let store = MovieStore::seeded(&Schema::movie())?;

    tracing::info!(
        "Loaded {} movies, allowed origins: {:?}",
        store.len(),
        config.allowed_origins
    );

    ApiServer::new(AppState::new(store))
        .run(config)
        .await
}
