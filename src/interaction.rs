// Side effects the views ask their collaborators to perform
use serde::{Deserialize, Serialize};

/// An engagement event reported upward by a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Interaction {
    BookmarkToggled { place_id: String, bookmarked: bool },
    LikeToggled { post_id: String, liked: bool, likes: u32 },
    CommentRequested { post_id: String },
    ShareRequested { post_id: String },
    FollowToggled { user_id: String, following: bool },
    NotificationRead { notification_id: String },
    AllNotificationsRead { count: u32 },
    NotificationRemoved { notification_id: String },
    ReviewLiked { review_id: String, liked: bool, helpful_count: u32 },
    ReplyRequested { review_id: String },
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::BookmarkToggled { .. } => "bookmark_toggled",
            Interaction::LikeToggled { .. } => "like_toggled",
            Interaction::CommentRequested { .. } => "comment_requested",
            Interaction::ShareRequested { .. } => "share_requested",
            Interaction::FollowToggled { .. } => "follow_toggled",
            Interaction::NotificationRead { .. } => "notification_read",
            Interaction::AllNotificationsRead { .. } => "all_notifications_read",
            Interaction::NotificationRemoved { .. } => "notification_removed",
            Interaction::ReviewLiked { .. } => "review_liked",
            Interaction::ReplyRequested { .. } => "reply_requested",
        }
    }

    /// Id of the record the event is about, if it targets a single one
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Interaction::BookmarkToggled { place_id, .. } => Some(place_id),
            Interaction::LikeToggled { post_id, .. }
            | Interaction::CommentRequested { post_id }
            | Interaction::ShareRequested { post_id } => Some(post_id),
            Interaction::FollowToggled { user_id, .. } => Some(user_id),
            Interaction::NotificationRead { notification_id }
            | Interaction::NotificationRemoved { notification_id } => Some(notification_id),
            Interaction::ReviewLiked { review_id, .. }
            | Interaction::ReplyRequested { review_id } => Some(review_id),
            Interaction::AllNotificationsRead { .. } => None,
        }
    }

    /// On/off state after a toggle
    pub fn active(&self) -> Option<bool> {
        match self {
            Interaction::BookmarkToggled { bookmarked, .. } => Some(*bookmarked),
            Interaction::LikeToggled { liked, .. } => Some(*liked),
            Interaction::FollowToggled { following, .. } => Some(*following),
            Interaction::ReviewLiked { liked, .. } => Some(*liked),
            _ => None,
        }
    }
}

/// Viewer's like flag plus the liked record's counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub likes: u32,
}

impl LikeState {
    /// Flip the flag and move the counter with it, never below zero
    pub fn toggle(self) -> Self {
        if self.liked {
            Self {
                liked: false,
                likes: self.likes.saturating_sub(1),
            }
        } else {
            Self {
                liked: true,
                likes: self.likes.saturating_add(1),
            }
        }
    }
}
