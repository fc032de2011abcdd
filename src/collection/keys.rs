use serde::Serialize;
use std::fmt;

/// Which slice of a collection is shown
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterKey {
    #[default]
    All,
    Only(String),
}

impl FilterKey {
    /// `"all"` and the empty string select everything; anything else is matched verbatim
    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        if key.is_empty() || key == "all" {
            FilterKey::All
        } else {
            FilterKey::Only(key.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterKey::All => "all",
            FilterKey::Only(key) => key,
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering applied to the working set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Highest rating first
    Rating,
    /// Alphabetical, accent and case insensitive
    Name,
    /// Most reviewed first
    Reviews,
    /// Most liked / followed / helpful first
    Popular,
    /// Newest first
    Recent,
}

impl SortKey {
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim() {
            "rating" => Some(SortKey::Rating),
            "name" => Some(SortKey::Name),
            "reviews" => Some(SortKey::Reviews),
            "popular" => Some(SortKey::Popular),
            "recent" => Some(SortKey::Recent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Rating => "rating",
            SortKey::Name => "name",
            SortKey::Reviews => "reviews",
            SortKey::Popular => "popular",
            SortKey::Recent => "recent",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
