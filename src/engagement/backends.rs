use std::sync::Arc;

use crate::api::ApiClient;
use crate::catalog::{CatalogRepository, HttpCatalogRepository};
use crate::favorite::{FavoriteRepository, HttpFavoriteRepository};
use crate::review::{
    CommentRepository, HttpCommentRepository, HttpReviewRepository, ReviewRepository,
};

/// The four remote resource families the controller talks to
#[derive(Clone)]
pub struct Backends {
    pub catalog: Arc<dyn CatalogRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Backends {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        favorites: Arc<dyn FavoriteRepository>,
        reviews: Arc<dyn ReviewRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            catalog,
            favorites,
            reviews,
            comments,
        }
    }

    /// All four families served by one HTTP backend
    pub fn http(api: &ApiClient) -> Self {
        Self {
            catalog: Arc::new(HttpCatalogRepository::new(api.clone())),
            favorites: Arc::new(HttpFavoriteRepository::new(api.clone())),
            reviews: Arc::new(HttpReviewRepository::new(api.clone())),
            comments: Arc::new(HttpCommentRepository::new(api.clone())),
        }
    }
}
