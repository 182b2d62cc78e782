//! REST routes. Catalog and health routes are public; everything else sits
//! behind [`crate::auth::require_admin`].

mod apps;
mod audit;
mod catalog;
mod health;
mod media;
mod organizations;
mod timeline;
mod users;
mod versions;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/v1/version", get(health::version))
        .route("/v1/catalog/apps", get(catalog::list))
        .route("/v1/catalog/apps/{slug}", get(catalog::get))
        .route("/v1/catalog/apps/{slug}/versions", get(catalog::versions))
        .route("/v1/catalog/apps/{slug}/timeline", get(catalog::timeline))
        .route("/v1/catalog/apps/{slug}/media", get(catalog::media))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/organizations",
            get(organizations::list).post(organizations::create),
        )
        .route(
            "/v1/organizations/by-slug/{slug}",
            get(organizations::get_by_slug),
        )
        .route(
            "/v1/organizations/{id}",
            get(organizations::get)
                .patch(organizations::update)
                .delete(organizations::delete),
        )
        .route("/v1/users", get(users::list).post(users::create))
        .route(
            "/v1/users/{id}",
            get(users::get).patch(users::update).delete(users::delete),
        )
        .route("/v1/apps", get(apps::list).post(apps::create))
        .route("/v1/apps/by-slug/{slug}", get(apps::get_by_slug))
        .route(
            "/v1/apps/{id}",
            get(apps::get).patch(apps::update).delete(apps::delete),
        )
        .route("/v1/apps/{id}/status", post(apps::transition))
        .route(
            "/v1/apps/{id}/versions",
            get(versions::list).post(versions::create),
        )
        .route("/v1/apps/{id}/versions/latest", get(versions::latest))
        .route(
            "/v1/versions/{id}",
            get(versions::get).delete(versions::delete),
        )
        .route(
            "/v1/apps/{id}/timeline",
            get(timeline::list).post(timeline::create),
        )
        .route(
            "/v1/timeline/{id}",
            get(timeline::get)
                .patch(timeline::update)
                .delete(timeline::delete),
        )
        .route("/v1/apps/{id}/media", get(media::list))
        .route("/v1/media/uploads", post(media::request_upload))
        .route(
            "/v1/media/{id}",
            get(media::get).patch(media::update).delete(media::delete),
        )
        .route("/v1/media/{id}/complete", post(media::complete))
        .route("/v1/media/{id}/retry", post(media::retry))
        .route("/v1/audit", get(audit::query))
}
