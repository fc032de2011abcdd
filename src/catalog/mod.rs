pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{
    BookmarkedPlace, Category, City, CustomList, FeedPost, NewReview, Notification,
    NotificationKind, Place, PostKind, PostSubject, Review, User,
};
pub use repository::{
    CatalogRepository, RepositoryError, SharedRepository, SqliteCatalogRepository,
};
pub use service::{CatalogService, CollectionPage, MapView, PlaceDetail};
