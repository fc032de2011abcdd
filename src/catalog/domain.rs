// Domain records - immutable snapshots handed out by the repository
use async_graphql::{ComplexObject, Enum, InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::map::{project, GeoPoint, Locatable, MarkerPosition};

/// Image shown when a record carries no thumbnail or photo
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// A stored value that does not name any known variant
#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} variant: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Place category
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Enum, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Restaurant,
    Attraction,
    Accommodation,
    Activity,
    Shopping,
    Nightlife,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Restaurant,
        Category::Attraction,
        Category::Accommodation,
        Category::Activity,
        Category::Shopping,
        Category::Nightlife,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Attraction => "attraction",
            Category::Accommodation => "accommodation",
            Category::Activity => "activity",
            Category::Shopping => "shopping",
            Category::Nightlife => "nightlife",
            Category::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point of interest with location, category and aggregate rating
#[derive(Clone, Debug, Serialize, Deserialize, SimpleObject, Validate)]
#[graphql(complex)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub address: String,
    pub city: String,
    pub country: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub thumbnail: Option<String>,

    /// Aggregate rating in [0, 5]
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,

    pub review_count: u32,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[ComplexObject]
impl Place {
    /// Thumbnail, or the placeholder image when none is set
    async fn thumbnail_url(&self) -> String {
        self.thumbnail_or_placeholder().to_string()
    }

    /// Marker position on the schematic map, in percent
    async fn position(&self) -> MarkerPosition {
        project(self.location())
    }
}

impl Place {
    pub fn thumbnail_or_placeholder(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

impl Locatable for Place {
    fn marker_id(&self) -> &str {
        &self.id
    }

    fn marker_label(&self) -> &str {
        &self.name
    }

    fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A city travellers can follow
#[derive(Clone, Debug, Serialize, Deserialize, SimpleObject, Validate)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: String,
    pub name: String,
    pub country: String,
    pub description: Option<String>,
    pub image: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub follower_count: u32,
    pub place_count: u32,
    pub review_count: u32,
    pub trending: bool,
    pub created_at: DateTime<Utc>,
}

impl City {
    /// Case-insensitive substring match on name or country. An empty query matches.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.country.to_lowercase().contains(&query)
    }
}

impl Locatable for City {
    fn marker_id(&self) -> &str {
        &self.id
    }

    fn marker_label(&self) -> &str {
        &self.name
    }

    fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A user-curated list of bookmarks
#[derive(Clone, Debug, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct CustomList {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub place_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A place saved by the viewer, optionally filed under one of their lists
#[derive(Clone, Debug, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkedPlace {
    pub bookmark_id: String,
    pub list_id: Option<String>,
    pub bookmarked_at: DateTime<Utc>,
    pub place: Place,
}

/// Feed post variant
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Enum, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Review,
    Bookmark,
    ListCreated,
    ListUpdated,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Review => "review",
            PostKind::Bookmark => "bookmark",
            PostKind::ListCreated => "list_created",
            PostKind::ListUpdated => "list_updated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "review" => Some(PostKind::Review),
            "bookmark" => Some(PostKind::Bookmark),
            "list_created" => Some(PostKind::ListCreated),
            "list_updated" => Some(PostKind::ListUpdated),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PostKind::Review => "⭐",
            PostKind::Bookmark => "🔖",
            PostKind::ListCreated => "📋",
            PostKind::ListUpdated => "📝",
        }
    }

    /// Phrase placed between the author and the subject in the activity line
    pub fn action(&self) -> &'static str {
        match self {
            PostKind::Review => "left a review on",
            PostKind::Bookmark => "bookmarked",
            PostKind::ListCreated => "created a list",
            PostKind::ListUpdated => "updated their list",
        }
    }

    /// Whether posts of this kind point at a place (otherwise at a list)
    pub fn targets_place(&self) -> bool {
        matches!(self, PostKind::Review | PostKind::Bookmark)
    }
}

/// What a feed post is about
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PostSubject {
    Place { id: String, name: String, city: String },
    List { id: String, title: String },
}

/// Social timeline entry
#[derive(Clone, Debug, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub kind: PostKind,

    #[graphql(skip)]
    pub subject: PostSubject,

    pub content: Option<String>,
    pub likes: u32,
    pub comments: u32,

    /// Whether the viewer has liked this post
    pub liked: bool,

    pub created_at: DateTime<Utc>,
}

#[ComplexObject]
impl FeedPost {
    async fn icon(&self) -> &'static str {
        self.kind.icon()
    }

    async fn action(&self) -> &'static str {
        self.kind.action()
    }

    /// Place or list title the post refers to
    async fn target(&self) -> &str {
        self.target_name()
    }

    async fn headline(&self) -> String {
        self.summary()
    }

    async fn place_id(&self) -> Option<&str> {
        match &self.subject {
            PostSubject::Place { id, .. } => Some(id),
            PostSubject::List { .. } => None,
        }
    }

    async fn place_city(&self) -> Option<&str> {
        match &self.subject {
            PostSubject::Place { city, .. } => Some(city),
            PostSubject::List { .. } => None,
        }
    }

    async fn list_id(&self) -> Option<&str> {
        match &self.subject {
            PostSubject::List { id, .. } => Some(id),
            PostSubject::Place { .. } => None,
        }
    }
}

impl FeedPost {
    pub fn target_name(&self) -> &str {
        match &self.subject {
            PostSubject::Place { name, .. } => name,
            PostSubject::List { title, .. } => title,
        }
    }

    /// Render the activity line, e.g. `Sarah Anderson left a review on Eiffel Tower in Paris`
    pub fn summary(&self) -> String {
        match &self.subject {
            PostSubject::Place { name, city, .. } => format!(
                "{} {} {} in {}",
                self.author_name,
                self.kind.action(),
                name,
                city
            ),
            PostSubject::List { title, .. } => {
                format!("{} {} \"{}\"", self.author_name, self.kind.action(), title)
            }
        }
    }
}

/// A review of a place
#[derive(Clone, Debug, Serialize, Deserialize, SimpleObject, Validate)]
#[graphql(complex)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub place_id: String,

    /// Star rating, 1 to 5
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,

    pub title: String,
    pub content: String,
    pub photos: Vec<String>,
    pub helpful_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[ComplexObject]
impl Review {
    /// Five flags, one per star, lit up to the rating
    async fn stars(&self) -> Vec<bool> {
        (1..=5).map(|i| i <= self.rating).collect()
    }
}

/// A review as submitted by the viewer
#[derive(Clone, Debug, Serialize, Deserialize, InputObject, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,

    #[validate(length(min = 1, max = 120))]
    pub title: String,

    #[validate(length(min = 1, max = 5000))]
    pub content: String,

    #[serde(default)]
    #[graphql(default)]
    pub photos: Vec<String>,
}

/// A traveller profile with its social counters
#[derive(Clone, Debug, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub follower_count: u32,
    pub following_count: u32,
    pub review_count: u32,
    pub list_count: u32,

    /// Whether the viewer follows this user
    pub is_following: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification variant
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Enum, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Follow,
    ReviewLike,
    ReviewResponse,
    Comment,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Follow => "follow",
            NotificationKind::ReviewLike => "review_like",
            NotificationKind::ReviewResponse => "review_response",
            NotificationKind::Comment => "comment",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "follow" => Some(NotificationKind::Follow),
            "review_like" => Some(NotificationKind::ReviewLike),
            "review_response" => Some(NotificationKind::ReviewResponse),
            "comment" => Some(NotificationKind::Comment),
            _ => None,
        }
    }

    /// Icon name for the notification row
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Follow => "users",
            NotificationKind::ReviewLike => "heart",
            NotificationKind::ReviewResponse | NotificationKind::Comment => "message-circle",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub kind: NotificationKind,
    pub actor_id: String,
    pub actor_name: String,
    pub place_id: Option<String>,
    pub review_id: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[ComplexObject]
impl Notification {
    async fn icon(&self) -> &'static str {
        self.kind.icon()
    }

    /// Age of the notification, e.g. `5m ago`
    async fn age(&self) -> String {
        relative_time(self.created_at, Utc::now())
    }
}

/// Compact age label: `just now`, `5m ago`, `3h ago`, `2d ago`, then a calendar date
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        then.format("%Y-%m-%d").to_string()
    }
}
