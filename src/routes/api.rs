// JSON mirrors of the read queries, plus review and follow writes
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::catalog::{
    BookmarkedPlace, City, CollectionPage, CustomList, FeedPost, MapView, NewReview,
    Notification, Place, PlaceDetail, Review, User,
};
use crate::interaction::Interaction;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Deserialize, Default)]
struct PlacesQuery {
    category: Option<String>,
    sort: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PlaceQuery {
    review_sort: Option<String>,
}

#[derive(Deserialize, Default)]
struct BookmarksQuery {
    list: Option<String>,
    sort: Option<String>,
}

#[derive(Deserialize, Default)]
struct FeedQuery {
    kind: Option<String>,
    sort: Option<String>,
}

#[derive(Deserialize, Default)]
struct CitiesQuery {
    search: Option<String>,
    filter: Option<String>,
    sort: Option<String>,
}

#[derive(Deserialize, Default)]
struct NotificationsQuery {
    filter: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MapQuery {
    category: Option<String>,
    focus: Option<String>,
    #[serde(default)]
    zoom_steps: i32,
    /// Comma-separated `in`/`out` presses
    zoom: Option<String>,
}

impl MapQuery {
    fn zoom_keys(&self) -> Vec<String> {
        self.zoom
            .as_deref()
            .map(|keys| {
                keys.split(',')
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

async fn places(
    State(state): State<AppState>,
    Query(q): Query<PlacesQuery>,
) -> AppResult<Json<CollectionPage<Place>>> {
    let page = state
        .catalog
        .places(q.category.as_deref(), q.sort.as_deref())
        .await?;
    Ok(Json(page))
}

async fn place(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(q): Query<PlaceQuery>,
) -> AppResult<Json<PlaceDetail>> {
    state
        .catalog
        .place(&id, q.review_sort.as_deref())
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn create_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(review): Json<NewReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let created = state.catalog.create_review(&id, &review).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn bookmarks(
    State(state): State<AppState>,
    Query(q): Query<BookmarksQuery>,
) -> AppResult<Json<CollectionPage<BookmarkedPlace>>> {
    let page = state
        .catalog
        .bookmarks(q.list.as_deref(), q.sort.as_deref())
        .await?;
    Ok(Json(page))
}

async fn lists(State(state): State<AppState>) -> AppResult<Json<Vec<CustomList>>> {
    Ok(Json(state.catalog.lists().await?))
}

async fn feed(
    State(state): State<AppState>,
    Query(q): Query<FeedQuery>,
) -> AppResult<Json<CollectionPage<FeedPost>>> {
    let page = state
        .catalog
        .feed(q.kind.as_deref(), q.sort.as_deref())
        .await?;
    Ok(Json(page))
}

async fn cities(
    State(state): State<AppState>,
    Query(q): Query<CitiesQuery>,
) -> AppResult<Json<CollectionPage<City>>> {
    let page = state
        .catalog
        .cities(q.search.as_deref(), q.filter.as_deref(), q.sort.as_deref())
        .await?;
    Ok(Json(page))
}

async fn notifications(
    State(state): State<AppState>,
    Query(q): Query<NotificationsQuery>,
) -> AppResult<Json<CollectionPage<Notification>>> {
    Ok(Json(state.catalog.notifications(q.filter.as_deref()).await?))
}

async fn following(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.catalog.following().await?))
}

async fn user(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<User>> {
    state
        .catalog
        .user(&id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn toggle_follow(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Interaction>> {
    Ok(Json(state.catalog.toggle_follow(&id).await?))
}

async fn map(
    State(state): State<AppState>,
    Query(q): Query<MapQuery>,
) -> AppResult<Json<MapView>> {
    let view = state
        .catalog
        .map(
            q.category.as_deref(),
            q.focus.as_deref(),
            q.zoom_steps,
            &q.zoom_keys(),
        )
        .await?;
    Ok(Json(view))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/places", get(places))
        .route("/api/places/{id}", get(place))
        .route("/api/places/{id}/reviews", post(create_review))
        .route("/api/bookmarks", get(bookmarks))
        .route("/api/lists", get(lists))
        .route("/api/feed", get(feed))
        .route("/api/cities", get(cities))
        .route("/api/notifications", get(notifications))
        .route("/api/following", get(following))
        .route("/api/users/{id}", get(user))
        .route("/api/users/{id}/follow", post(toggle_follow))
        .route("/api/map", get(map))
}
