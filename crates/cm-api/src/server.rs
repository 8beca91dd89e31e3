//! HTTP API Server
//!
//! Starts and manages the axum-based in-memory contacts backend.

use axum::Router;
use http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use cm_core::ApiConfig;

use crate::routes::routes;
use crate::store::ContactStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ContactStore>,
}

/// Build the application router around `store`
pub fn app(store: Arc<ContactStore>, allowed_origins: Option<&[String]>) -> Router {
    let state = AppState { store };

    Router::new()
        .merge(routes())
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = allowed_origins else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    info!("HTTP API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Start the HTTP API server
pub async fn start_server(config: &ApiConfig) -> anyhow::Result<()> {
    let store = match &config.seed_path {
        Some(path) => ContactStore::from_seed_file(path)?,
        None => ContactStore::seeded(),
    };

    let app = app(Arc::new(store), config.allowed_origins.as_deref());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    serve(listener, app).await
}
