// Filter fields and orderings for each catalog record type
use std::cmp::Ordering;

use super::collate::compare_names;
use super::{Comparator, Record, SortKey};
use crate::catalog::{BookmarkedPlace, City, FeedPost, Notification, Place, Review};

fn by_place_rating(a: &Place, b: &Place) -> Ordering {
    b.rating.total_cmp(&a.rating)
}

fn by_place_name(a: &Place, b: &Place) -> Ordering {
    compare_names(&a.name, &b.name)
}

fn by_place_reviews(a: &Place, b: &Place) -> Ordering {
    b.review_count.cmp(&a.review_count)
}

fn by_place_recent(a: &Place, b: &Place) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

/// Places filter on category
impl Record for Place {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn matches_filter(&self, key: &str) -> bool {
        self.category.as_str() == key
    }

    fn comparator(key: SortKey) -> Option<Comparator<Self>> {
        match key {
            SortKey::Rating => Some(by_place_rating),
            SortKey::Name => Some(by_place_name),
            SortKey::Reviews | SortKey::Popular => Some(by_place_reviews),
            SortKey::Recent => Some(by_place_recent),
        }
    }
}

/// Bookmarks filter on list id; `recent` means most recently bookmarked
impl Record for BookmarkedPlace {
    fn record_id(&self) -> &str {
        &self.place.id
    }

    fn matches_filter(&self, key: &str) -> bool {
        self.list_id.as_deref() == Some(key)
    }

    fn comparator(key: SortKey) -> Option<Comparator<Self>> {
        match key {
            SortKey::Rating => Some(|a, b| by_place_rating(&a.place, &b.place)),
            SortKey::Name => Some(|a, b| by_place_name(&a.place, &b.place)),
            SortKey::Reviews | SortKey::Popular => {
                Some(|a, b| by_place_reviews(&a.place, &b.place))
            }
            SortKey::Recent => Some(|a, b| b.bookmarked_at.cmp(&a.bookmarked_at)),
        }
    }
}

/// Feed posts filter on post kind
impl Record for FeedPost {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn matches_filter(&self, key: &str) -> bool {
        self.kind.as_str() == key
    }

    fn comparator(key: SortKey) -> Option<Comparator<Self>> {
        match key {
            SortKey::Popular => Some(|a, b| b.likes.cmp(&a.likes)),
            SortKey::Recent => Some(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::Rating | SortKey::Name | SortKey::Reviews => None,
        }
    }
}

/// Reviews filter on the reviewed place; `popular` means most helpful
impl Record for Review {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn matches_filter(&self, key: &str) -> bool {
        self.place_id == key
    }

    fn comparator(key: SortKey) -> Option<Comparator<Self>> {
        match key {
            SortKey::Rating => Some(|a, b| b.rating.cmp(&a.rating)),
            SortKey::Popular => Some(|a, b| b.helpful_count.cmp(&a.helpful_count)),
            SortKey::Recent => Some(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::Name | SortKey::Reviews => None,
        }
    }
}

/// Notifications filter on `unread` or on their kind
impl Record for Notification {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn matches_filter(&self, key: &str) -> bool {
        match key {
            "unread" => !self.read,
            kind => self.kind.as_str() == kind,
        }
    }

    fn comparator(key: SortKey) -> Option<Comparator<Self>> {
        match key {
            SortKey::Recent => Some(|a, b| b.created_at.cmp(&a.created_at)),
            _ => None,
        }
    }
}

/// Cities filter on `trending` or on country name
impl Record for City {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn matches_filter(&self, key: &str) -> bool {
        match key {
            "trending" => self.trending,
            country => self.country.eq_ignore_ascii_case(country),
        }
    }

    fn comparator(key: SortKey) -> Option<Comparator<Self>> {
        match key {
            SortKey::Name => Some(|a, b| compare_names(&a.name, &b.name)),
            SortKey::Popular => Some(|a, b| b.follower_count.cmp(&a.follower_count)),
            SortKey::Reviews => Some(|a, b| b.review_count.cmp(&a.review_count)),
            SortKey::Recent => Some(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::Rating => None,
        }
    }
}
