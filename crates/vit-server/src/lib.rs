//! # vit-server
//!
//! HTTP surface for Vitrine: health probes, the public catalog, the admin
//! REST API, and a GraphQL endpoint, all served by one axum router.

pub mod auth;
pub mod error;
pub mod extract;
pub mod graphql;
pub mod ops;
pub mod request_tracing;
pub mod rest;
pub mod state;

use std::future::Future;

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::{Extension, Router, middleware};

pub use error::ApiError;
pub use state::AppState;

/// Build the full router over `state`.
pub fn router(state: AppState) -> Router {
    let schema = graphql::build_schema(state.clone());
    let admin = rest::admin_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_admin,
    ));

    Router::new()
        .merge(rest::public_routes())
        .merge(admin)
        .route("/graphql", post(graphql::handler))
        .layer(Extension(schema))
        .layer(DefaultBodyLimit::max(state.config.server.body_limit_bytes))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_tracing::request_tracing,
        ))
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` resolves, then let in-flight
/// requests finish.
///
/// # Errors
///
/// Returns an I/O error if the address cannot be bound.
pub async fn serve<F>(state: AppState, addr: &str, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "vitrine listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
