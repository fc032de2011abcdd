// Builds the filtered/sorted views and routes interactions to the repository
use async_graphql::{OutputType, SimpleObject};
use serde::Serialize;

use crate::catalog::domain::*;
use crate::catalog::repository::{RepositoryError, SharedRepository};
use crate::collection::{CollectionView, Record};
use crate::config::MapConfig;
use crate::interaction::Interaction;
use crate::map::{layout_markers, GeoPoint, MapViewport, Marker};

/// One rendered collection: the ordered working set plus its view state
#[derive(Clone, Debug, Serialize, SimpleObject)]
#[graphql(
    concrete(name = "PlacePage", params(Place)),
    concrete(name = "BookmarkPage", params(BookmarkedPlace)),
    concrete(name = "FeedPage", params(FeedPost)),
    concrete(name = "ReviewPage", params(Review)),
    concrete(name = "NotificationPage", params(Notification)),
    concrete(name = "CityPage", params(City))
)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPage<T: OutputType> {
    pub items: Vec<T>,
    /// Records in the working set
    pub count: u32,
    /// Records before filtering
    pub total: u32,
    /// Set when nothing matched, so callers can render a fallback
    pub is_empty: bool,
    pub filter: String,
    pub sort: Option<String>,
}

fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl<T: Record + OutputType> From<CollectionView<T>> for CollectionPage<T> {
    fn from(view: CollectionView<T>) -> Self {
        let state = view.state();
        let total = saturating_count(view.source_len());
        let filter = view.filter().to_string();
        let sort = view.sort().map(|key| key.to_string());
        Self {
            count: saturating_count(state.count()),
            total,
            is_empty: state.is_empty(),
            filter,
            sort,
            items: view.into_items(),
        }
    }
}

#[derive(Clone, Debug, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetail {
    pub place: Place,
    pub reviews: CollectionPage<Review>,
    pub bookmarked: bool,
}

/// Marker layout and viewport state for the schematic map
#[derive(Clone, Debug, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub markers: Vec<Marker>,
    pub center: GeoPoint,
    pub zoom: u8,
    pub focused: Option<Place>,
    pub is_empty: bool,
}

fn browse<T: Record>(records: Vec<T>, filter: Option<&str>, sort: Option<&str>) -> CollectionView<T> {
    let mut view = CollectionView::new(records);
    view.set_filter(filter.unwrap_or("all"));
    if let Some(sort) = sort {
        view.set_sort(sort);
    }
    view
}

fn emit(interaction: Interaction) -> Interaction {
    tracing::info!(
        event = interaction.name(),
        target = interaction.target_id().unwrap_or("-"),
        "interaction"
    );
    interaction
}

#[derive(Clone)]
pub struct CatalogService {
    repo: SharedRepository,
    viewer_id: String,
    map: MapConfig,
}

impl CatalogService {
    pub fn new(repo: SharedRepository, viewer_id: impl Into<String>, map: MapConfig) -> Self {
        Self {
            repo,
            viewer_id: viewer_id.into(),
            map,
        }
    }

    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    pub async fn places(
        &self,
        category: Option<&str>,
        sort: Option<&str>,
    ) -> Result<CollectionPage<Place>, RepositoryError> {
        let places = self.repo.places().await?;
        Ok(browse(places, category, sort).into())
    }

    pub async fn place(
        &self,
        id: &str,
        review_sort: Option<&str>,
    ) -> Result<Option<PlaceDetail>, RepositoryError> {
        let Some(place) = self.repo.place(id).await? else {
            return Ok(None);
        };
        let reviews = self.reviews(id, review_sort).await?;
        let bookmarked = self
            .repo
            .bookmarks(&self.viewer_id)
            .await?
            .iter()
            .any(|b| b.place.id == id);

        Ok(Some(PlaceDetail {
            place,
            reviews,
            bookmarked,
        }))
    }

    pub async fn reviews(
        &self,
        place_id: &str,
        sort: Option<&str>,
    ) -> Result<CollectionPage<Review>, RepositoryError> {
        let reviews = self.repo.reviews(place_id).await?;
        Ok(browse(reviews, None, sort).into())
    }

    pub async fn bookmarks(
        &self,
        list: Option<&str>,
        sort: Option<&str>,
    ) -> Result<CollectionPage<BookmarkedPlace>, RepositoryError> {
        let bookmarks = self.repo.bookmarks(&self.viewer_id).await?;
        Ok(browse(bookmarks, list, sort).into())
    }

    pub async fn lists(&self) -> Result<Vec<CustomList>, RepositoryError> {
        self.repo.lists(&self.viewer_id).await
    }

    /// Following feed, newest first unless another order is asked for
    pub async fn feed(
        &self,
        kind: Option<&str>,
        sort: Option<&str>,
    ) -> Result<CollectionPage<FeedPost>, RepositoryError> {
        let posts = self.repo.feed(&self.viewer_id).await?;
        Ok(browse(posts, kind, Some(sort.unwrap_or("recent"))).into())
    }

    /// Cities matching `search`, then narrowed by `filter` (`trending` or a country)
    pub async fn cities(
        &self,
        search: Option<&str>,
        filter: Option<&str>,
        sort: Option<&str>,
    ) -> Result<CollectionPage<City>, RepositoryError> {
        let query = search.unwrap_or_default();
        let cities: Vec<City> = self
            .repo
            .cities()
            .await?
            .into_iter()
            .filter(|city| city.matches_query(query))
            .collect();
        Ok(browse(cities, filter, sort).into())
    }

    pub async fn notifications(
        &self,
        filter: Option<&str>,
    ) -> Result<CollectionPage<Notification>, RepositoryError> {
        let notifications = self.repo.notifications(&self.viewer_id).await?;
        Ok(browse(notifications, filter, Some("recent")).into())
    }

    pub async fn unread_count(&self) -> Result<u32, RepositoryError> {
        let notifications = self.repo.notifications(&self.viewer_id).await?;
        Ok(saturating_count(
            notifications.iter().filter(|n| !n.read).count(),
        ))
    }

    /// Lay out the places of `category` and focus `focus` when it is among them.
    ///
    /// `zoom_steps` zooms in (positive) or out (negative) after focusing, then
    /// each `zoom_keys` entry (`in` / `out`) is pressed in order. Unknown keys
    /// and presses past the bounds do nothing.
    pub async fn map(
        &self,
        category: Option<&str>,
        focus: Option<&str>,
        zoom_steps: i32,
        zoom_keys: &[String],
    ) -> Result<MapView, RepositoryError> {
        let view = browse(self.repo.places().await?, category, None);

        let mut viewport = MapViewport::new(self.map.center(), self.map.initial_zoom)
            .with_detail_zoom(self.map.detail_zoom);
        let focused = focus
            .and_then(|id| view.items().iter().find(|place| place.id == id))
            .cloned();
        viewport.select_marker(focused.as_ref());
        viewport.zoom_steps(zoom_steps);
        for key in zoom_keys {
            if !viewport.zoom_by_key(key) {
                tracing::debug!(key = key.as_str(), "zoom key ignored");
            }
        }

        Ok(MapView {
            markers: layout_markers(view.items(), viewport.focused()),
            center: viewport.center(),
            zoom: viewport.zoom_level(),
            focused,
            is_empty: view.state().is_empty(),
        })
    }

    /// Users the viewer follows
    pub async fn following(&self) -> Result<Vec<User>, RepositoryError> {
        self.repo.following(&self.viewer_id).await
    }

    pub async fn user(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        self.repo.user(&self.viewer_id, id).await
    }

    /// Post a review as the viewer
    pub async fn create_review(
        &self,
        place_id: &str,
        review: &NewReview,
    ) -> Result<Review, RepositoryError> {
        self.repo
            .create_review(&self.viewer_id, place_id, review)
            .await
    }

    pub async fn toggle_review_like(&self, review_id: &str) -> Result<Interaction, RepositoryError> {
        let state = self
            .repo
            .toggle_review_like(&self.viewer_id, review_id)
            .await?;
        Ok(emit(Interaction::ReviewLiked {
            review_id: review_id.to_string(),
            liked: state.liked,
            helpful_count: state.likes,
        }))
    }

    /// Replies are written elsewhere; this only reports the request
    pub async fn request_reply(&self, review_id: &str) -> Result<Interaction, RepositoryError> {
        if !self.repo.review_exists(review_id).await? {
            return Err(RepositoryError::NotFound(format!("review {}", review_id)));
        }
        Ok(emit(Interaction::ReplyRequested {
            review_id: review_id.to_string(),
        }))
    }

    pub async fn toggle_bookmark(&self, place_id: &str) -> Result<Interaction, RepositoryError> {
        let bookmarked = self.repo.toggle_bookmark(&self.viewer_id, place_id).await?;
        Ok(emit(Interaction::BookmarkToggled {
            place_id: place_id.to_string(),
            bookmarked,
        }))
    }

    pub async fn toggle_like(&self, post_id: &str) -> Result<Interaction, RepositoryError> {
        let state = self.repo.toggle_like(&self.viewer_id, post_id).await?;
        Ok(emit(Interaction::LikeToggled {
            post_id: post_id.to_string(),
            liked: state.liked,
            likes: state.likes,
        }))
    }

    /// Comments are handled by a collaborator; this only reports the request
    pub async fn request_comment(&self, post_id: &str) -> Result<Interaction, RepositoryError> {
        self.ensure_post(post_id).await?;
        Ok(emit(Interaction::CommentRequested {
            post_id: post_id.to_string(),
        }))
    }

    pub async fn share_post(&self, post_id: &str) -> Result<Interaction, RepositoryError> {
        self.ensure_post(post_id).await?;
        Ok(emit(Interaction::ShareRequested {
            post_id: post_id.to_string(),
        }))
    }

    pub async fn toggle_follow(&self, user_id: &str) -> Result<Interaction, RepositoryError> {
        let following = self.repo.toggle_follow(&self.viewer_id, user_id).await?;
        Ok(emit(Interaction::FollowToggled {
            user_id: user_id.to_string(),
            following,
        }))
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<Interaction, RepositoryError> {
        if !self.repo.mark_notification_read(&self.viewer_id, id).await? {
            return Err(RepositoryError::NotFound(format!("notification {}", id)));
        }
        Ok(emit(Interaction::NotificationRead {
            notification_id: id.to_string(),
        }))
    }

    pub async fn mark_all_notifications_read(&self) -> Result<Interaction, RepositoryError> {
        let count = self.repo.mark_all_notifications_read(&self.viewer_id).await?;
        Ok(emit(Interaction::AllNotificationsRead { count }))
    }

    pub async fn remove_notification(&self, id: &str) -> Result<Interaction, RepositoryError> {
        if !self.repo.remove_notification(&self.viewer_id, id).await? {
            return Err(RepositoryError::NotFound(format!("notification {}", id)));
        }
        Ok(emit(Interaction::NotificationRemoved {
            notification_id: id.to_string(),
        }))
    }

    async fn ensure_post(&self, post_id: &str) -> Result<(), RepositoryError> {
        if self.repo.post_exists(post_id).await? {
            Ok(())
        } else {
            Err(RepositoryError::NotFound(format!("post {}", post_id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SqliteCatalogRepository;
    use crate::db;
    use crate::map::{DETAIL_ZOOM, MAX_ZOOM, MIN_ZOOM};
    use r2d2::Pool;
    use r2d2_sqlite::SqliteConnectionManager;

    fn service() -> CatalogService {
        let manager = SqliteConnectionManager::memory()
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        let pool = Pool::builder().max_size(1).build(manager).unwrap();
        db::run_migrations(&pool).unwrap();
        db::seed_fixtures(&pool).unwrap();
        CatalogService::new(
            SqliteCatalogRepository::shared(pool),
            "me",
            MapConfig::default(),
        )
    }

    #[tokio::test]
    async fn places_filter_and_sort() {
        let page = service()
            .places(Some("restaurant"), Some("rating"))
            .await
            .unwrap();
        let ids: Vec<_> = page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["le-jules-verne", "trattoria-veneto"]);
        assert_eq!(page.count, 2);
        assert_eq!(page.total, 10);
        assert_eq!(page.filter, "restaurant");
        assert_eq!(page.sort.as_deref(), Some("rating"));
    }

    #[tokio::test]
    async fn empty_category_reports_empty_page() {
        let page = service().places(Some("nightlife"), None).await.unwrap();
        assert!(page.is_empty);
        assert!(page.items.is_empty());
        assert_eq!(page.count, 0);
    }

    #[tokio::test]
    async fn unknown_sort_keeps_source_order() {
        let svc = service();
        let unsorted = svc.places(None, None).await.unwrap();
        let trending = svc.places(None, Some("trending")).await.unwrap();
        let ids = |page: &CollectionPage<Place>| {
            page.items.iter().map(|p| p.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&unsorted), ids(&trending));
        assert_eq!(trending.sort, None);
    }

    #[tokio::test]
    async fn bookmarks_filter_by_list() {
        let page = service()
            .bookmarks(Some("wishlist"), Some("name"))
            .await
            .unwrap();
        let names: Vec<_> = page.items.iter().map(|b| b.place.name.as_str()).collect();
        assert_eq!(names, vec!["Park Güell", "Sagrada Família", "Tokyo Senso-ji"]);
    }

    #[tokio::test]
    async fn feed_defaults_to_newest_first() {
        let svc = service();
        let recent = svc.feed(None, None).await.unwrap();
        assert_eq!(recent.items[0].id, "post1");
        assert_eq!(recent.sort.as_deref(), Some("recent"));

        let popular = svc.feed(None, Some("popular")).await.unwrap();
        assert_eq!(popular.items[0].id, "post6");

        let lists = svc.feed(Some("list_created"), None).await.unwrap();
        assert_eq!(lists.count, 2);
    }

    #[tokio::test]
    async fn cities_combine_search_and_trending() {
        let svc = service();
        let japan = svc.cities(Some("japan"), None, None).await.unwrap();
        assert_eq!(japan.count, 2);

        let trending_japan = svc
            .cities(Some("japan"), Some("trending"), Some("popular"))
            .await
            .unwrap();
        let ids: Vec<_> = trending_japan.items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["tokyo", "kyoto"]);

        let none = svc.cities(Some("atlantis"), None, None).await.unwrap();
        assert!(none.is_empty);
    }

    #[tokio::test]
    async fn map_focuses_place_and_zooms_to_detail() {
        let view = service()
            .map(None, Some("colosseum"), 0, &[])
            .await
            .unwrap();
        assert_eq!(view.zoom, DETAIL_ZOOM);
        assert_eq!(view.center, GeoPoint::new(41.8902, 12.4923));
        assert_eq!(view.focused.as_ref().map(|p| p.id.as_str()), Some("colosseum"));
        assert_eq!(view.markers.iter().filter(|m| m.focused).count(), 1);
    }

    #[tokio::test]
    async fn map_ignores_focus_outside_filter() {
        let view = service()
            .map(Some("restaurant"), Some("colosseum"), 20, &[])
            .await
            .unwrap();
        assert!(view.focused.is_none());
        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.zoom, MAX_ZOOM);
    }

    #[tokio::test]
    async fn map_applies_zoom_keys_after_steps() {
        let keys: Vec<String> = ["out", "out", "sideways", "in"]
            .into_iter()
            .map(String::from)
            .collect();
        let view = service()
            .map(None, Some("colosseum"), 1, &keys)
            .await
            .unwrap();
        assert_eq!(view.zoom, DETAIL_ZOOM);

        let keys = vec!["out".to_string(); 40];
        let view = service().map(None, None, 0, &keys).await.unwrap();
        assert_eq!(view.zoom, MIN_ZOOM);
    }

    #[tokio::test]
    async fn review_interactions_report_events() {
        let svc = service();
        let review = svc
            .create_review(
                "sagano-bamboo-forest",
                &NewReview {
                    rating: 5,
                    title: "Go before eight".into(),
                    content: "The grove is silent at dawn.".into(),
                    photos: vec![],
                },
            )
            .await
            .unwrap();
        assert_eq!(review.author_id, "me");

        let event = svc.toggle_review_like(&review.id).await.unwrap();
        assert_eq!(
            event,
            Interaction::ReviewLiked {
                review_id: review.id.clone(),
                liked: true,
                helpful_count: 1
            }
        );

        let event = svc.request_reply("review2").await.unwrap();
        assert_eq!(event.name(), "reply_requested");
        assert!(matches!(
            svc.request_reply("review404").await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn follow_toggle_shows_in_following() {
        let svc = service();
        assert_eq!(svc.following().await.unwrap().len(), 6);

        svc.toggle_follow("user6").await.unwrap();
        let following = svc.following().await.unwrap();
        assert_eq!(following.len(), 5);
        assert!(following.iter().all(|u| u.is_following));
        assert!(!svc.user("user6").await.unwrap().unwrap().is_following);
    }

    #[tokio::test]
    async fn interactions_report_events() {
        let svc = service();
        let event = svc.toggle_like("post2").await.unwrap();
        assert_eq!(
            event,
            Interaction::LikeToggled {
                post_id: "post2".into(),
                liked: true,
                likes: 157
            }
        );

        let event = svc.request_comment("post2").await.unwrap();
        assert_eq!(event.name(), "comment_requested");
        assert!(matches!(
            svc.request_comment("nope").await,
            Err(RepositoryError::NotFound(_))
        ));

        assert_eq!(svc.unread_count().await.unwrap(), 3);
        svc.mark_notification_read("n1").await.unwrap();
        assert_eq!(svc.unread_count().await.unwrap(), 2);
        assert!(svc.mark_notification_read("n404").await.is_err());
    }
}
