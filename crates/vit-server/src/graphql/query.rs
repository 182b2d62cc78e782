use async_graphql::{Context, Object};
use vit_core::entities::{App, AppVersion, Organization, TimelineEvent, User};
use vit_core::inputs::AppFilter;
use vit_core::responses::{MediaWithUrl, Page};

use super::{admin, gql, state};
use crate::ops;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Published apps matching `filter`.
    async fn catalog(
        &self,
        ctx: &Context<'_>,
        filter: Option<AppFilter>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> async_graphql::Result<Page<App>> {
        let state = state(ctx)?;
        let limit = state.page_limit(limit);
        gql(state
            .svc
            .catalog(&filter.unwrap_or_default(), limit, offset.unwrap_or(0))
            .await)
    }

    /// A published app by slug.
    async fn catalog_app(&self, ctx: &Context<'_>, slug: String) -> async_graphql::Result<App> {
        gql(state(ctx)?.svc.get_published_app(&slug).await)
    }

    async fn apps(
        &self,
        ctx: &Context<'_>,
        filter: Option<AppFilter>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> async_graphql::Result<Page<App>> {
        let (state, _) = admin(ctx)?;
        let limit = state.page_limit(limit);
        gql(state
            .svc
            .list_apps(&filter.unwrap_or_default(), limit, offset.unwrap_or(0))
            .await)
    }

    async fn app(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<App> {
        gql(admin(ctx)?.0.svc.get_app(&id).await)
    }

    async fn app_by_slug(&self, ctx: &Context<'_>, slug: String) -> async_graphql::Result<App> {
        gql(admin(ctx)?.0.svc.get_app_by_slug(&slug).await)
    }

    async fn organizations(
        &self,
        ctx: &Context<'_>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> async_graphql::Result<Page<Organization>> {
        let (state, _) = admin(ctx)?;
        let limit = state.page_limit(limit);
        gql(state.svc.list_organizations(limit, offset.unwrap_or(0)).await)
    }

    async fn organization(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<Organization> {
        gql(admin(ctx)?.0.svc.get_organization(&id).await)
    }

    async fn users(
        &self,
        ctx: &Context<'_>,
        organization_id: Option<String>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> async_graphql::Result<Page<User>> {
        let (state, _) = admin(ctx)?;
        let limit = state.page_limit(limit);
        gql(state
            .svc
            .list_users(organization_id.as_deref(), limit, offset.unwrap_or(0))
            .await)
    }

    async fn user(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<User> {
        gql(admin(ctx)?.0.svc.get_user(&id).await)
    }

    async fn media(
        &self,
        ctx: &Context<'_>,
        app_id: String,
        #[graphql(default)] ready_only: bool,
    ) -> async_graphql::Result<Vec<MediaWithUrl>> {
        let (state, _) = admin(ctx)?;
        gql(ops::list_media(state, &app_id, ready_only).await)
    }

    async fn timeline(
        &self,
        ctx: &Context<'_>,
        app_id: String,
    ) -> async_graphql::Result<Vec<TimelineEvent>> {
        gql(admin(ctx)?.0.svc.list_timeline(&app_id).await)
    }

    /// Newest semantic version first.
    async fn versions(
        &self,
        ctx: &Context<'_>,
        app_id: String,
    ) -> async_graphql::Result<Vec<AppVersion>> {
        gql(admin(ctx)?.0.svc.list_app_versions(&app_id).await)
    }
}
