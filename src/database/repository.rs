//! Persistence seams used by the guards and handlers.
//!
//! MongoDB-backed implementations live next to each resource
//! (`blog::service`, `comment::service`, `user::service`); tests run against
//! the in-memory implementations in [`super::memory`].

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::blog::model::{Blog, BlogForm};
use crate::comment::model::Comment;
use crate::user::model::User;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Database(String),

    #[error("{0}")]
    Duplicate(String),
}

impl From<mongodb::error::Error> for RepoError {
    fn from(err: mongodb::error::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Every blog, in whatever order the store returns them.
    async fn find_all(&self) -> Result<Vec<Blog>, RepoError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Blog>, RepoError>;

    async fn create(&self, blog: Blog) -> Result<Blog, RepoError>;

    /// Applies only the fields present in `changes`. Returns the updated blog,
    /// or `None` when it does not exist.
    async fn update(&self, id: &ObjectId, changes: BlogForm) -> Result<Option<Blog>, RepoError>;

    /// Removes the blog, returning it if it existed.
    async fn delete(&self, id: &ObjectId) -> Result<Option<Blog>, RepoError>;

    /// Appends a comment reference in a single update. Returns `false` when the
    /// blog does not exist.
    async fn push_comment(&self, id: &ObjectId, comment_id: &ObjectId) -> Result<bool, RepoError>;

    async fn pull_comment(&self, id: &ObjectId, comment_id: &ObjectId) -> Result<bool, RepoError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Comment>, RepoError>;

    /// Fetches the comments with the given ids. Order is unspecified and
    /// missing ids are skipped.
    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<Comment>, RepoError>;

    async fn create(&self, comment: Comment) -> Result<Comment, RepoError>;

    async fn update_text(&self, id: &ObjectId, text: String) -> Result<Option<Comment>, RepoError>;

    async fn delete(&self, id: &ObjectId) -> Result<bool, RepoError>;

    async fn delete_many(&self, ids: &[ObjectId]) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Fails with [`RepoError::Duplicate`] when the username is taken.
    async fn create(&self, user: User) -> Result<User, RepoError>;
}
