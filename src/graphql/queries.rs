use async_graphql::*;

use crate::catalog::{
    BookmarkedPlace, CatalogService, City, CollectionPage, CustomList, FeedPost, MapView,
    Notification, Place, PlaceDetail, Review, User,
};

/// GraphQL Query root
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Places in a category (`all` for every place), optionally sorted
    async fn places(
        &self,
        ctx: &Context<'_>,
        category: Option<String>,
        sort: Option<String>,
    ) -> Result<CollectionPage<Place>> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog
            .places(category.as_deref(), sort.as_deref())
            .await?)
    }

    /// A place with its reviews
    async fn place(
        &self,
        ctx: &Context<'_>,
        id: String,
        review_sort: Option<String>,
    ) -> Result<Option<PlaceDetail>> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.place(&id, review_sort.as_deref()).await?)
    }

    async fn reviews(
        &self,
        ctx: &Context<'_>,
        place_id: String,
        sort: Option<String>,
    ) -> Result<CollectionPage<Review>> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.reviews(&place_id, sort.as_deref()).await?)
    }

    /// The viewer's saved places, filtered by list id
    async fn bookmarks(
        &self,
        ctx: &Context<'_>,
        list: Option<String>,
        sort: Option<String>,
    ) -> Result<CollectionPage<BookmarkedPlace>> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.bookmarks(list.as_deref(), sort.as_deref()).await?)
    }

    async fn lists(&self, ctx: &Context<'_>) -> Result<Vec<CustomList>> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.lists().await?)
    }

    /// Posts from followed users, filtered by post kind
    async fn feed(
        &self,
        ctx: &Context<'_>,
        kind: Option<String>,
        sort: Option<String>,
    ) -> Result<CollectionPage<FeedPost>> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.feed(kind.as_deref(), sort.as_deref()).await?)
    }

    async fn cities(
        &self,
        ctx: &Context<'_>,
        search: Option<String>,
        filter: Option<String>,
        sort: Option<String>,
    ) -> Result<CollectionPage<City>> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog
            .cities(search.as_deref(), filter.as_deref(), sort.as_deref())
            .await?)
    }

    /// Notifications, filtered by `unread` or a notification kind
    async fn notifications(
        &self,
        ctx: &Context<'_>,
        filter: Option<String>,
    ) -> Result<CollectionPage<Notification>> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.notifications(filter.as_deref()).await?)
    }

    async fn unread_count(&self, ctx: &Context<'_>) -> Result<u32> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.unread_count().await?)
    }

    /// Users the viewer follows
    async fn following(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.following().await?)
    }

    async fn user(&self, ctx: &Context<'_>, id: String) -> Result<Option<User>> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog.user(&id).await?)
    }

    /// Map markers for a category, with an optional focused place.
    ///
    /// `zoom` lists `in`/`out` presses applied after `zoomSteps`.
    async fn map(
        &self,
        ctx: &Context<'_>,
        category: Option<String>,
        focus: Option<String>,
        #[graphql(default)] zoom_steps: i32,
        #[graphql(default)] zoom: Vec<String>,
    ) -> Result<MapView> {
        let catalog = ctx.data::<CatalogService>()?;
        Ok(catalog
            .map(category.as_deref(), focus.as_deref(), zoom_steps, &zoom)
            .await?)
    }
}
