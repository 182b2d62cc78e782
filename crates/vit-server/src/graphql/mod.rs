//! GraphQL endpoint over the same workflows as the REST routes.
//!
//! Catalog queries are public. Every other query and every mutation needs
//! admin access; failures come back as field errors with `extensions.code`.

mod mutation;
mod query;

use async_graphql::{EmptySubscription, ErrorExtensions, Schema};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Extension, Json};

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use crate::auth::{Actor, is_admin};
use crate::error::ApiError;
use crate::state::AppState;

pub type VitSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Who is calling, attached to each GraphQL request.
#[derive(Debug, Clone, Default)]
pub struct Caller {
    pub admin: bool,
    pub actor: Option<String>,
}

#[must_use]
pub fn build_schema(state: AppState) -> VitSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

pub async fn handler(
    State(state): State<AppState>,
    Extension(schema): Extension<VitSchema>,
    headers: HeaderMap,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let caller = Caller {
        admin: is_admin(&headers, &state),
        actor: Actor::from_headers(&headers).0,
    };
    Json(schema.execute(request.data(caller)).await)
}

fn state<'a>(ctx: &async_graphql::Context<'a>) -> async_graphql::Result<&'a AppState> {
    ctx.data::<AppState>()
}

/// State plus the caller's actor name, or an `unauthorized` error.
fn admin<'a>(
    ctx: &async_graphql::Context<'a>,
) -> async_graphql::Result<(&'a AppState, Option<&'a str>)> {
    let caller = ctx.data_opt::<Caller>();
    if !caller.is_some_and(|c| c.admin) {
        return Err(ApiError::unauthorized().extend());
    }
    Ok((state(ctx)?, caller.and_then(|c| c.actor.as_deref())))
}

/// Convert any error the workflows raise into a coded GraphQL error.
fn gql<T, E: Into<ApiError>>(result: Result<T, E>) -> async_graphql::Result<T> {
    result.map_err(|e| e.into().extend())
}
