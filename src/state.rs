use std::sync::Arc;

use mongodb::Database;

use crate::blog::service::BlogService;
use crate::comment::service::CommentService;
use crate::config::AppConfig;
use crate::database::repository::{BlogRepository, CommentRepository, UserRepository};
use crate::user::service::UserService;

/// Shared handles given to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub site_name: String,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(db: &Database, users: UserService, config: &AppConfig) -> Self {
        AppState {
            blogs: Arc::new(BlogService::new(db)),
            comments: Arc::new(CommentService::new(db)),
            users: Arc::new(users),
            site_name: config.site_name.clone(),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        use crate::database::memory::{MemoryBlogs, MemoryComments, MemoryUsers};

        AppState {
            blogs: Arc::new(MemoryBlogs::default()),
            comments: Arc::new(MemoryComments::default()),
            users: Arc::new(MemoryUsers::default()),
            site_name: "Disrupter".to_string(),
            bcrypt_cost: 4,
        }
    }
}
