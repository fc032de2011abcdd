use async_graphql::*;

use crate::catalog::{CatalogService, NewReview, Review};
use crate::graphql::types::InteractionEvent;

/// GraphQL Mutation root
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Save or unsave a place for the viewer
    async fn toggle_bookmark(&self, ctx: &Context<'_>, place_id: String) -> Result<InteractionEvent> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.toggle_bookmark(&place_id).await?.into())
    }

    async fn toggle_like(&self, ctx: &Context<'_>, post_id: String) -> Result<InteractionEvent> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.toggle_like(&post_id).await?.into())
    }

    async fn request_comment(&self, ctx: &Context<'_>, post_id: String) -> Result<InteractionEvent> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.request_comment(&post_id).await?.into())
    }

    async fn share_post(&self, ctx: &Context<'_>, post_id: String) -> Result<InteractionEvent> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.share_post(&post_id).await?.into())
    }

    /// Post a review of a place as the viewer; ratings run from 1 to 5
    async fn create_review(
        &self,
        ctx: &Context<'_>,
        place_id: String,
        input: NewReview,
    ) -> Result<Review> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.create_review(&place_id, &input).await?)
    }

    /// Mark a review helpful, or take the vote back
    async fn toggle_review_like(
        &self,
        ctx: &Context<'_>,
        review_id: String,
    ) -> Result<InteractionEvent> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.toggle_review_like(&review_id).await?.into())
    }

    async fn request_reply(&self, ctx: &Context<'_>, review_id: String) -> Result<InteractionEvent> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.request_reply(&review_id).await?.into())
    }

    async fn toggle_follow(&self, ctx: &Context<'_>, user_id: String) -> Result<InteractionEvent> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.toggle_follow(&user_id).await?.into())
    }

    async fn mark_notification_read(
        &self,
        ctx: &Context<'_>,
        id: String,
    ) -> Result<InteractionEvent> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.mark_notification_read(&id).await?.into())
    }

    async fn mark_all_notifications_read(&self, ctx: &Context<'_>) -> Result<InteractionEvent> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.mark_all_notifications_read().await?.into())
    }

    async fn remove_notification(&self, ctx: &Context<'_>, id: String) -> Result<InteractionEvent> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.remove_notification(&id).await?.into())
    }
}
