use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};

use crate::storage::Storage;

mod forms;
mod handlers;
mod models;
mod render;

use handlers::{
    add_book, add_form, delete_book, health, library, not_found, root, search,
};

#[derive(Clone)]
pub struct AppState<S: Storage> {
    pub storage: S,
    pub started_at: std::time::SystemTime,
}

pub fn router<S: Storage + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health::<S>))
        .route("/add", get(add_form).post(add_book::<S>))
        .route("/library", get(library::<S>))
        .route("/library/delete", post(delete_book::<S>))
        .route("/search", get(search::<S>))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve<S: Storage + Clone + Send + Sync + 'static>(
    addr: SocketAddr,
    storage: S,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 Library UI on http://{}", addr);

    let app = router(AppState {
        storage,
        started_at: std::time::SystemTime::now(),
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 Web shutdown requested");
        })
        .await?;
    log::info!("👋 Web server exited");
    Ok(())
}
