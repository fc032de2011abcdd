// Repository pattern - the only place that touches storage
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, Type, ValueRef};
use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::catalog::domain::*;
use crate::interaction::LikeState;
use crate::state::DbPool;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid record {id}: {errors}")]
    Validation {
        id: String,
        errors: ValidationErrors,
    },

    /// The caller asked for something the catalog does not allow
    #[error("Invalid request: {0}")]
    Invalid(String),

    /// A stored row is inconsistent with its own kind
    #[error("Corrupt record {0}")]
    Corrupt(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Data source for every catalog view
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn places(&self) -> Result<Vec<Place>, RepositoryError>;

    async fn place(&self, id: &str) -> Result<Option<Place>, RepositoryError>;

    async fn reviews(&self, place_id: &str) -> Result<Vec<Review>, RepositoryError>;

    async fn review_exists(&self, review_id: &str) -> Result<bool, RepositoryError>;

    /// Store a review by `user_id` and bump the place's review counter
    async fn create_review(
        &self,
        user_id: &str,
        place_id: &str,
        review: &NewReview,
    ) -> Result<Review, RepositoryError>;

    /// Helpful-vote toggle; the counter is the review's helpful count
    async fn toggle_review_like(
        &self,
        user_id: &str,
        review_id: &str,
    ) -> Result<LikeState, RepositoryError>;

    async fn cities(&self) -> Result<Vec<City>, RepositoryError>;

    /// Lists owned by `user_id`, with their bookmark counts
    async fn lists(&self, user_id: &str) -> Result<Vec<CustomList>, RepositoryError>;

    async fn bookmarks(&self, user_id: &str) -> Result<Vec<BookmarkedPlace>, RepositoryError>;

    /// Posts by users `viewer_id` follows, with the viewer's like flags
    async fn feed(&self, viewer_id: &str) -> Result<Vec<FeedPost>, RepositoryError>;

    async fn post_exists(&self, post_id: &str) -> Result<bool, RepositoryError>;

    /// Users `viewer_id` follows, in the order they were followed
    async fn following(&self, viewer_id: &str) -> Result<Vec<User>, RepositoryError>;

    async fn user(&self, viewer_id: &str, id: &str) -> Result<Option<User>, RepositoryError>;

    async fn notifications(&self, user_id: &str) -> Result<Vec<Notification>, RepositoryError>;

    /// Returns whether the place is bookmarked afterwards
    async fn toggle_bookmark(&self, user_id: &str, place_id: &str)
        -> Result<bool, RepositoryError>;

    async fn toggle_like(&self, user_id: &str, post_id: &str)
        -> Result<LikeState, RepositoryError>;

    /// Returns whether `follower_id` follows `following_id` afterwards
    async fn toggle_follow(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<bool, RepositoryError>;

    /// Returns false when no such notification belongs to the user
    async fn mark_notification_read(&self, user_id: &str, id: &str)
        -> Result<bool, RepositoryError>;

    /// Returns how many notifications changed
    async fn mark_all_notifications_read(&self, user_id: &str) -> Result<u32, RepositoryError>;

    async fn remove_notification(&self, user_id: &str, id: &str) -> Result<bool, RepositoryError>;
}

pub type SharedRepository = Arc<dyn CatalogRepository>;

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Category::parse(s).ok_or_else(|| unknown("category", s))
    }
}

impl FromSql for PostKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        PostKind::parse(s).ok_or_else(|| unknown("post kind", s))
    }
}

impl FromSql for NotificationKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        NotificationKind::parse(s).ok_or_else(|| unknown("notification kind", s))
    }
}

fn unknown(kind: &'static str, value: &str) -> FromSqlError {
    FromSqlError::Other(Box::new(UnknownVariant {
        kind,
        value: value.to_string(),
    }))
}

// Timestamps are stored as RFC 3339 text
fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn validated<T: Validate>(id: &str, record: T) -> Result<T, RepositoryError> {
    match record.validate() {
        Ok(()) => Ok(record),
        Err(errors) => {
            tracing::warn!(id, %errors, "rejecting invalid record");
            Err(RepositoryError::Validation {
                id: id.to_string(),
                errors,
            })
        }
    }
}

const PLACE_COLUMNS: &str = "p.id, p.name, p.description, p.category, p.address, p.city, \
     p.country, p.latitude, p.longitude, p.thumbnail, p.rating, p.review_count, \
     p.created_by, p.created_at, p.updated_at";

/// Map the columns selected by `PLACE_COLUMNS`, starting at `offset`
fn place_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Place> {
    Ok(Place {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        description: row.get(offset + 2)?,
        category: row.get(offset + 3)?,
        address: row.get(offset + 4)?,
        city: row.get(offset + 5)?,
        country: row.get(offset + 6)?,
        latitude: row.get(offset + 7)?,
        longitude: row.get(offset + 8)?,
        thumbnail: row.get(offset + 9)?,
        rating: row.get(offset + 10)?,
        review_count: row.get(offset + 11)?,
        created_by: row.get(offset + 12)?,
        created_at: timestamp(row, offset + 13)?,
        updated_at: timestamp(row, offset + 14)?,
    })
}

// ?1 is always the viewer
const USER_COLUMNS: &str = "u.id, u.username, u.full_name, u.bio, u.avatar,
     (SELECT COUNT(*) FROM follows f WHERE f.following_id = u.id),
     (SELECT COUNT(*) FROM follows f WHERE f.follower_id = u.id),
     (SELECT COUNT(*) FROM reviews r WHERE r.user_id = u.id),
     (SELECT COUNT(*) FROM custom_lists l WHERE l.user_id = u.id),
     EXISTS (SELECT 1 FROM follows f WHERE f.follower_id = ?1 AND f.following_id = u.id),
     u.created_at";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        full_name: row.get(2)?,
        bio: row.get(3)?,
        avatar: row.get(4)?,
        follower_count: row.get(5)?,
        following_count: row.get(6)?,
        review_count: row.get(7)?,
        list_count: row.get(8)?,
        is_following: row.get(9)?,
        created_at: timestamp(row, 10)?,
    })
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// SQLite implementation
pub struct SqliteCatalogRepository {
    pool: DbPool,
}

impl SqliteCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn shared(pool: DbPool) -> SharedRepository {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn places(&self) -> Result<Vec<Place>, RepositoryError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM places p ORDER BY p.created_at, p.id",
            PLACE_COLUMNS
        ))?;

        let places = stmt
            .query_map([], |row| place_from_row(row, 0))?
            .collect::<Result<Vec<_>, _>>()?;

        places
            .into_iter()
            .map(|place| {
                let id = place.id.clone();
                validated(&id, place)
            })
            .collect()
    }

    async fn place(&self, id: &str) -> Result<Option<Place>, RepositoryError> {
        let conn = self.pool.get()?;
        let place = conn
            .query_row(
                &format!("SELECT {} FROM places p WHERE p.id = ?1", PLACE_COLUMNS),
                params![id],
                |row| place_from_row(row, 0),
            )
            .optional()?;

        place.map(|place| validated(id, place)).transpose()
    }

    async fn reviews(&self, place_id: &str) -> Result<Vec<Review>, RepositoryError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT r.id, r.user_id, u.full_name, r.place_id, r.rating, r.title, r.content,
                    r.photos, r.helpful_count, r.created_at, r.updated_at
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.place_id = ?1
             ORDER BY r.created_at DESC",
        )?;

        let rows = stmt
            .query_map(params![place_id], |row| {
                Ok((
                    Review {
                        id: row.get(0)?,
                        author_id: row.get(1)?,
                        author_name: row.get(2)?,
                        place_id: row.get(3)?,
                        rating: row.get(4)?,
                        title: row.get(5)?,
                        content: row.get(6)?,
                        photos: Vec::new(),
                        helpful_count: row.get(8)?,
                        created_at: timestamp(row, 9)?,
                        updated_at: timestamp(row, 10)?,
                    },
                    row.get::<_, String>(7)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(mut review, photos)| {
                review.photos = serde_json::from_str(&photos)?;
                let id = review.id.clone();
                validated(&id, review)
            })
            .collect()
    }

    async fn review_exists(&self, review_id: &str) -> Result<bool, RepositoryError> {
        let conn = self.pool.get()?;
        let exists = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM reviews WHERE id = ?1)",
            params![review_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    async fn create_review(
        &self,
        user_id: &str,
        place_id: &str,
        review: &NewReview,
    ) -> Result<Review, RepositoryError> {
        review
            .validate()
            .map_err(|errors| RepositoryError::Invalid(format!("review: {}", errors)))?;

        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let place_known: bool = tx.query_row(
            "SELECT EXISTS (SELECT 1 FROM places WHERE id = ?1)",
            params![place_id],
            |row| row.get(0),
        )?;
        if !place_known {
            return Err(RepositoryError::NotFound(format!("place {}", place_id)));
        }
        let author_name: String = tx
            .query_row(
                "SELECT full_name FROM users WHERE id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| RepositoryError::NotFound(format!("user {}", user_id)))?;

        let now = Utc::now().trunc_subsecs(0);
        let id = uuid::Uuid::now_v7().to_string();
        let created = validated(
            &id,
            Review {
                id: id.clone(),
                author_id: user_id.to_string(),
                author_name,
                place_id: place_id.to_string(),
                rating: review.rating,
                title: review.title.trim().to_string(),
                content: review.content.trim().to_string(),
                photos: review.photos.clone(),
                helpful_count: 0,
                created_at: now,
                updated_at: now,
            },
        )?;

        tx.execute(
            "INSERT INTO reviews
                (id, user_id, place_id, rating, title, content, photos, helpful_count,
                 created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8, ?8)",
            params![
                created.id,
                created.author_id,
                created.place_id,
                created.rating,
                created.title,
                created.content,
                serde_json::to_string(&created.photos)?,
                format_timestamp(now)
            ],
        )?;
        tx.execute(
            "UPDATE places SET review_count = review_count + 1, updated_at = ?2 WHERE id = ?1",
            params![place_id, format_timestamp(now)],
        )?;

        tx.commit()?;
        tracing::info!(user_id, place_id, review_id = %created.id, rating = created.rating, "review created");
        Ok(created)
    }

    async fn toggle_review_like(
        &self,
        user_id: &str,
        review_id: &str,
    ) -> Result<LikeState, RepositoryError> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let current = tx
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM review_likes WHERE user_id = ?1 AND review_id = ?2),
                        helpful_count
                 FROM reviews WHERE id = ?2",
                params![user_id, review_id],
                |row| {
                    Ok(LikeState {
                        liked: row.get(0)?,
                        likes: row.get(1)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| RepositoryError::NotFound(format!("review {}", review_id)))?;

        let next = current.toggle();
        if next.liked {
            tx.execute(
                "INSERT INTO review_likes (user_id, review_id) VALUES (?1, ?2)",
                params![user_id, review_id],
            )?;
        } else {
            tx.execute(
                "DELETE FROM review_likes WHERE user_id = ?1 AND review_id = ?2",
                params![user_id, review_id],
            )?;
        }
        tx.execute(
            "UPDATE reviews SET helpful_count = ?1 WHERE id = ?2",
            params![next.likes, review_id],
        )?;

        tx.commit()?;
        tracing::info!(user_id, review_id, liked = next.liked, helpful = next.likes, "review like toggled");
        Ok(next)
    }

    async fn cities(&self) -> Result<Vec<City>, RepositoryError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, country, description, image, latitude, longitude,
                    follower_count, place_count, review_count, trending, created_at
             FROM cities ORDER BY rowid",
        )?;

        let cities = stmt
            .query_map([], |row| {
                Ok(City {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    country: row.get(2)?,
                    description: row.get(3)?,
                    image: row.get(4)?,
                    latitude: row.get(5)?,
                    longitude: row.get(6)?,
                    follower_count: row.get(7)?,
                    place_count: row.get(8)?,
                    review_count: row.get(9)?,
                    trending: row.get(10)?,
                    created_at: timestamp(row, 11)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        cities
            .into_iter()
            .map(|city| {
                let id = city.id.clone();
                validated(&id, city)
            })
            .collect()
    }

    async fn lists(&self, user_id: &str) -> Result<Vec<CustomList>, RepositoryError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT l.id, l.user_id, l.title, l.description, l.is_public,
                    (SELECT COUNT(*) FROM bookmarks b WHERE b.list_id = l.id),
                    l.created_at, l.updated_at
             FROM custom_lists l
             WHERE l.user_id = ?1
             ORDER BY l.rowid",
        )?;

        let lists = stmt
            .query_map(params![user_id], |row| {
                Ok(CustomList {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    title: row.get(2)?,
                    description: row.get(3)?,
                    is_public: row.get(4)?,
                    place_count: row.get(5)?,
                    created_at: timestamp(row, 6)?,
                    updated_at: timestamp(row, 7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(lists)
    }

    async fn bookmarks(&self, user_id: &str) -> Result<Vec<BookmarkedPlace>, RepositoryError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT b.id, b.list_id, b.created_at, {}
             FROM bookmarks b
             JOIN places p ON p.id = b.place_id
             WHERE b.user_id = ?1
             ORDER BY b.created_at, b.id",
            PLACE_COLUMNS
        ))?;

        let bookmarks = stmt
            .query_map(params![user_id], |row| {
                Ok(BookmarkedPlace {
                    bookmark_id: row.get(0)?,
                    list_id: row.get(1)?,
                    bookmarked_at: timestamp(row, 2)?,
                    place: place_from_row(row, 3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        bookmarks
            .into_iter()
            .map(|mut bookmark| {
                let id = bookmark.place.id.clone();
                bookmark.place = validated(&id, bookmark.place)?;
                Ok(bookmark)
            })
            .collect()
    }

    async fn feed(&self, viewer_id: &str) -> Result<Vec<FeedPost>, RepositoryError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT f.id, f.user_id, u.full_name, f.kind, f.content, f.likes, f.comments,
                    f.created_at,
                    EXISTS (SELECT 1 FROM post_likes pl WHERE pl.post_id = f.id AND pl.user_id = ?1),
                    p.id, p.name, p.city, l.id, l.title
             FROM feed_posts f
             JOIN users u ON u.id = f.user_id
             JOIN follows fo ON fo.following_id = f.user_id AND fo.follower_id = ?1
             LEFT JOIN places p ON p.id = f.place_id
             LEFT JOIN custom_lists l ON l.id = f.list_id
             ORDER BY f.created_at DESC",
        )?;

        let rows = stmt
            .query_map(params![viewer_id], |row| {
                let id: String = row.get(0)?;
                let kind: PostKind = row.get(3)?;
                let place: (Option<String>, Option<String>, Option<String>) =
                    (row.get(9)?, row.get(10)?, row.get(11)?);
                let list: (Option<String>, Option<String>) = (row.get(12)?, row.get(13)?);

                let subject = match (kind.targets_place(), place, list) {
                    (true, (Some(id), Some(name), Some(city)), _) => {
                        PostSubject::Place { id, name, city }
                    }
                    (false, _, (Some(id), Some(title))) => PostSubject::List { id, title },
                    // Review/bookmark posts need a place, list posts a list
                    _ => return Ok(Err(id)),
                };

                Ok(Ok(FeedPost {
                    id,
                    author_id: row.get(1)?,
                    author_name: row.get(2)?,
                    kind,
                    subject,
                    content: row.get(4)?,
                    likes: row.get(5)?,
                    comments: row.get(6)?,
                    liked: row.get(8)?,
                    created_at: timestamp(row, 7)?,
                }))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| {
                row.map_err(|id| {
                    tracing::warn!(%id, "feed post has no subject for its kind");
                    RepositoryError::Corrupt(id)
                })
            })
            .collect()
    }

    async fn post_exists(&self, post_id: &str) -> Result<bool, RepositoryError> {
        let conn = self.pool.get()?;
        let exists = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM feed_posts WHERE id = ?1)",
            params![post_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    async fn following(&self, viewer_id: &str) -> Result<Vec<User>, RepositoryError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {}
             FROM follows fo
             JOIN users u ON u.id = fo.following_id
             WHERE fo.follower_id = ?1
             ORDER BY fo.rowid",
            USER_COLUMNS
        ))?;

        let users = stmt
            .query_map(params![viewer_id], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    async fn user(&self, viewer_id: &str, id: &str) -> Result<Option<User>, RepositoryError> {
        let conn = self.pool.get()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users u WHERE u.id = ?2", USER_COLUMNS),
                params![viewer_id, id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    async fn notifications(&self, user_id: &str) -> Result<Vec<Notification>, RepositoryError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT n.id, n.user_id, n.kind, n.actor_id, u.full_name, n.place_id, n.review_id,
                    n.message, n.read, n.created_at
             FROM notifications n
             JOIN users u ON u.id = n.actor_id
             WHERE n.user_id = ?1
             ORDER BY n.created_at DESC",
        )?;

        let notifications = stmt
            .query_map(params![user_id], |row| {
                Ok(Notification {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    kind: row.get(2)?,
                    actor_id: row.get(3)?,
                    actor_name: row.get(4)?,
                    place_id: row.get(5)?,
                    review_id: row.get(6)?,
                    message: row.get(7)?,
                    read: row.get(8)?,
                    created_at: timestamp(row, 9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notifications)
    }

    async fn toggle_bookmark(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let removed = tx.execute(
            "DELETE FROM bookmarks WHERE user_id = ?1 AND place_id = ?2",
            params![user_id, place_id],
        )?;

        let bookmarked = if removed == 0 {
            let place_known: bool = tx.query_row(
                "SELECT EXISTS (SELECT 1 FROM places WHERE id = ?1)",
                params![place_id],
                |row| row.get(0),
            )?;
            if !place_known {
                return Err(RepositoryError::NotFound(format!("place {}", place_id)));
            }

            tx.execute(
                "INSERT INTO bookmarks (id, user_id, place_id, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    uuid::Uuid::now_v7().to_string(),
                    user_id,
                    place_id,
                    format_timestamp(Utc::now())
                ],
            )?;
            true
        } else {
            false
        };

        tx.commit()?;
        tracing::info!(user_id, place_id, bookmarked, "bookmark toggled");
        Ok(bookmarked)
    }

    async fn toggle_like(&self, user_id: &str, post_id: &str) -> Result<LikeState, RepositoryError> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let current = tx
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM post_likes WHERE user_id = ?1 AND post_id = ?2),
                        likes
                 FROM feed_posts WHERE id = ?2",
                params![user_id, post_id],
                |row| {
                    Ok(LikeState {
                        liked: row.get(0)?,
                        likes: row.get(1)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| RepositoryError::NotFound(format!("post {}", post_id)))?;

        let next = current.toggle();
        if next.liked {
            tx.execute(
                "INSERT INTO post_likes (user_id, post_id) VALUES (?1, ?2)",
                params![user_id, post_id],
            )?;
        } else {
            tx.execute(
                "DELETE FROM post_likes WHERE user_id = ?1 AND post_id = ?2",
                params![user_id, post_id],
            )?;
        }
        tx.execute(
            "UPDATE feed_posts SET likes = ?1 WHERE id = ?2",
            params![next.likes, post_id],
        )?;

        tx.commit()?;
        tracing::info!(user_id, post_id, liked = next.liked, likes = next.likes, "like toggled");
        Ok(next)
    }

    async fn toggle_follow(
        &self,
        follower_id: &str,
        following_id: &str,
    ) -> Result<bool, RepositoryError> {
        if follower_id == following_id {
            return Err(RepositoryError::Invalid(format!(
                "{} cannot follow themselves",
                follower_id
            )));
        }

        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let removed = tx.execute(
            "DELETE FROM follows WHERE follower_id = ?1 AND following_id = ?2",
            params![follower_id, following_id],
        )?;

        let following = if removed == 0 {
            let user_known: bool = tx.query_row(
                "SELECT EXISTS (SELECT 1 FROM users WHERE id = ?1)",
                params![following_id],
                |row| row.get(0),
            )?;
            if !user_known {
                return Err(RepositoryError::NotFound(format!("user {}", following_id)));
            }
            tx.execute(
                "INSERT INTO follows (follower_id, following_id) VALUES (?1, ?2)",
                params![follower_id, following_id],
            )?;
            true
        } else {
            false
        };

        tx.commit()?;
        tracing::info!(follower_id, following_id, following, "follow toggled");
        Ok(following)
    }

    async fn mark_notification_read(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<bool, RepositoryError> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "UPDATE notifications SET read = 1 WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }

    async fn mark_all_notifications_read(&self, user_id: &str) -> Result<u32, RepositoryError> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "UPDATE notifications SET read = 1 WHERE user_id = ?1 AND read = 0",
            params![user_id],
        )?;
        tracing::info!(user_id, rows, "notifications marked read");
        Ok(u32::try_from(rows).unwrap_or(u32::MAX))
    }

    async fn remove_notification(&self, user_id: &str, id: &str) -> Result<bool, RepositoryError> {
        let conn = self.pool.get()?;
        let rows = conn.execute(
            "DELETE FROM notifications WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }
}
