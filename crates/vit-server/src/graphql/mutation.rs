use async_graphql::{Context, Object};
use vit_core::entities::{App, AppVersion, Organization, TimelineEvent, User};
use vit_core::enums::AppStatus;
use vit_core::inputs::{
    CreateAppInput, CreateAppVersionInput, CreateOrganizationInput, CreateTimelineEventInput,
    CreateUserInput, RequestUploadInput, UpdateAppInput, UpdateMediaInput,
    UpdateOrganizationInput, UpdateTimelineEventInput, UpdateUserInput,
};
use vit_core::responses::{MediaWithUrl, PresignedUpload};

use super::{admin, gql};
use crate::ops;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_organization(
        &self,
        ctx: &Context<'_>,
        input: CreateOrganizationInput,
    ) -> async_graphql::Result<Organization> {
        let (state, actor) = admin(ctx)?;
        gql(state.svc.create_organization(actor, input).await)
    }

    async fn update_organization(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: UpdateOrganizationInput,
    ) -> async_graphql::Result<Organization> {
        let (state, actor) = admin(ctx)?;
        gql(state.svc.update_organization(actor, &id, input).await)
    }

    async fn delete_organization(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<bool> {
        let (state, actor) = admin(ctx)?;
        gql(state.svc.delete_organization(actor, &id).await)?;
        Ok(true)
    }

    async fn create_user(
        &self,
        ctx: &Context<'_>,
        input: CreateUserInput,
    ) -> async_graphql::Result<User> {
        let (state, actor) = admin(ctx)?;
        gql(ops::create_user(state, actor, input).await)
    }

    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: UpdateUserInput,
    ) -> async_graphql::Result<User> {
        let (state, actor) = admin(ctx)?;
        gql(state.svc.update_user(actor, &id, input).await)
    }

    async fn delete_user(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<bool> {
        let (state, actor) = admin(ctx)?;
        gql(state.svc.delete_user(actor, &id).await)?;
        Ok(true)
    }

    async fn create_app(&self, ctx: &Context<'_>, input: CreateAppInput) -> async_graphql::Result<App> {
        let (state, actor) = admin(ctx)?;
        gql(state.svc.create_app(actor, input).await)
    }

    async fn update_app(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: UpdateAppInput,
    ) -> async_graphql::Result<App> {
        let (state, actor) = admin(ctx)?;
        gql(state.svc.update_app(actor, &id, input).await)
    }

    async fn transition_app(
        &self,
        ctx: &Context<'_>,
        id: String,
        status: AppStatus,
    ) -> async_graphql::Result<App> {
        let (state, actor) = admin(ctx)?;
        gql(ops::transition_app(state, actor, &id, status).await)
    }

    /// Also deletes the app's versions, media, and timeline.
    async fn delete_app(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<bool> {
        let (state, actor) = admin(ctx)?;
        gql(ops::delete_app(state, actor, &id).await)?;
        Ok(true)
    }

    async fn create_app_version(
        &self,
        ctx: &Context<'_>,
        input: CreateAppVersionInput,
    ) -> async_graphql::Result<AppVersion> {
        let (state, actor) = admin(ctx)?;
        gql(ops::create_app_version(state, actor, input).await)
    }

    async fn delete_app_version(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<bool> {
        let (state, actor) = admin(ctx)?;
        gql(state.svc.delete_app_version(actor, &id).await)?;
        Ok(true)
    }

    async fn create_timeline_event(
        &self,
        ctx: &Context<'_>,
        input: CreateTimelineEventInput,
    ) -> async_graphql::Result<TimelineEvent> {
        let (state, actor) = admin(ctx)?;
        gql(state.svc.create_timeline_event(actor, input).await)
    }

    async fn update_timeline_event(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: UpdateTimelineEventInput,
    ) -> async_graphql::Result<TimelineEvent> {
        let (state, actor) = admin(ctx)?;
        gql(state.svc.update_timeline_event(actor, &id, input).await)
    }

    async fn delete_timeline_event(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<bool> {
        let (state, actor) = admin(ctx)?;
        gql(state.svc.delete_timeline_event(actor, &id).await)?;
        Ok(true)
    }

    async fn request_media_upload(
        &self,
        ctx: &Context<'_>,
        input: RequestUploadInput,
    ) -> async_graphql::Result<PresignedUpload> {
        let (state, actor) = admin(ctx)?;
        gql(ops::request_upload(state, actor, input).await)
    }

    async fn complete_media_upload(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<MediaWithUrl> {
        let (state, actor) = admin(ctx)?;
        gql(ops::complete_upload(state, actor, &id).await)
    }

    async fn retry_media_upload(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> async_graphql::Result<PresignedUpload> {
        let (state, actor) = admin(ctx)?;
        gql(ops::retry_upload(state, actor, &id).await)
    }

    async fn update_media(
        &self,
        ctx: &Context<'_>,
        id: String,
        input: UpdateMediaInput,
    ) -> async_graphql::Result<MediaWithUrl> {
        let (state, actor) = admin(ctx)?;
        let media = gql(state.svc.update_media(actor, &id, input).await)?;
        gql(ops::with_url(state, media).await)
    }

    async fn delete_media(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<bool> {
        let (state, actor) = admin(ctx)?;
        gql(ops::delete_media(state, actor, &id).await)?;
        Ok(true)
    }
}
