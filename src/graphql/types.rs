use async_graphql::*;
use serde::Serialize;

use crate::interaction::Interaction;

/// Outcome of a mutation, as reported to the client
#[derive(Clone, Debug, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    /// Event name, e.g. `like_toggled`
    pub event: String,

    /// Record the event is about
    pub target_id: Option<String>,

    /// On/off state after a toggle
    pub active: Option<bool>,

    /// Like or helpful counter after a like toggle
    pub likes: Option<u32>,

    /// Notifications changed by a bulk update
    pub count: Option<u32>,
}

impl From<Interaction> for InteractionEvent {
    fn from(interaction: Interaction) -> Self {
        let likes = match &interaction {
            Interaction::LikeToggled { likes, .. } => Some(*likes),
            Interaction::ReviewLiked { helpful_count, .. } => Some(*helpful_count),
            _ => None,
        };
        let count = match &interaction {
            Interaction::AllNotificationsRead { count } => Some(*count),
            _ => None,
        };
        Self {
            event: interaction.name().to_string(),
            target_id: interaction.target_id().map(str::to_string),
            active: interaction.active(),
            likes,
            count,
        }
    }
}
