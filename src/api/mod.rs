pub mod handlers;
pub mod models;
pub mod router;

use crate::config::Config;
use crate::store::MovieStore;
use crate::validation::Schema;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<MovieStore>>,
    /// Fixes the year bound instead of following the calendar.
    pinned_year: Option<i32>,
}

impl AppState {
    pub fn new(store: MovieStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            pinned_year: None,
        }
    }

    /// State whose schema treats `current_year` as the current year.
    pub fn with_year(store: MovieStore, current_year: i32) -> Self {
        Self {
            pinned_year: Some(current_year),
            ..Self::new(store)
        }
    }

    /// Schema for the request being handled. Rebuilt each time so the
    /// year bound moves with the calendar on a long-running server.
    pub fn schema(&self) -> Schema {
        match self.pinned_year {
            Some(year) => Schema::movie_for_year(year),
            None => Schema::movie(),
        }
    }
}

pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Binds the server to the configured port and serves until Ctrl+C.
    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        let app = router::build(self.state, config.allowed_origins);
        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Rule;
    use chrono::Datelike;

    fn year_bound(schema: &Schema) -> Option<i64> {
        schema.fields.iter().find_map(|f| match (f.name, &f.rule) {
            ("year", Rule::IntRange { max, .. }) => Some(*max),
            _ => None,
        })
    }

    #[test]
    fn schema_follows_the_calendar() {
        let state = AppState::new(MovieStore::new());
        let next_year = i64::from(chrono::Utc::now().year()) + 1;
        assert_eq!(year_bound(&state.schema()), Some(next_year));
    }

    #[test]
    fn pinned_year_fixes_the_bound() {
        let state = AppState::with_year(MovieStore::new(), 2030);
        assert_eq!(year_bound(&state.schema()), Some(2031));
    }
}
