//! In-memory repositories used by the test suite.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::blog::model::{Blog, BlogForm};
use crate::comment::model::Comment;
use crate::database::repository::{BlogRepository, CommentRepository, RepoError, UserRepository};
use crate::user::account::USER_EXISTS;
use crate::user::model::User;

#[derive(Default)]
pub struct MemoryBlogs {
    rows: RwLock<Vec<Blog>>,
}

#[async_trait]
impl BlogRepository for MemoryBlogs {
    async fn find_all(&self) -> Result<Vec<Blog>, RepoError> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Blog>, RepoError> {
        Ok(self.rows.read().await.iter().find(|b| &b.id == id).cloned())
    }

    async fn create(&self, blog: Blog) -> Result<Blog, RepoError> {
        self.rows.write().await.push(blog.clone());
        Ok(blog)
    }

    async fn update(&self, id: &ObjectId, changes: BlogForm) -> Result<Option<Blog>, RepoError> {
        let mut rows = self.rows.write().await;
        let Some(blog) = rows.iter_mut().find(|b| &b.id == id) else {
            return Ok(None);
        };
        if let Some(title) = changes.title {
            blog.title = title;
        }
        if let Some(image) = changes.image {
            blog.image = image;
        }
        if let Some(body) = changes.body {
            blog.body = body;
        }
        Ok(Some(blog.clone()))
    }

    async fn delete(&self, id: &ObjectId) -> Result<Option<Blog>, RepoError> {
        let mut rows = self.rows.write().await;
        let removed = rows.iter().position(|b| &b.id == id).map(|pos| rows.remove(pos));
        Ok(removed)
    }

    async fn push_comment(&self, id: &ObjectId, comment_id: &ObjectId) -> Result<bool, RepoError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|b| &b.id == id) {
            Some(blog) => {
                blog.comments.push(*comment_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn pull_comment(&self, id: &ObjectId, comment_id: &ObjectId) -> Result<bool, RepoError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|b| &b.id == id) {
            Some(blog) => {
                blog.comments.retain(|c| c != comment_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryComments {
    rows: RwLock<Vec<Comment>>,
}

impl MemoryComments {
    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl CommentRepository for MemoryComments {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Comment>, RepoError> {
        Ok(self.rows.read().await.iter().find(|c| &c.id == id).cloned())
    }

    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<Comment>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn create(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.rows.write().await.push(comment.clone());
        Ok(comment)
    }

    async fn update_text(&self, id: &ObjectId, text: String) -> Result<Option<Comment>, RepoError> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|c| &c.id == id).map(|c| {
            c.text = text;
            c.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|c| &c.id != id);
        Ok(rows.len() < before)
    }

    async fn delete_many(&self, ids: &[ObjectId]) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|c| !ids.contains(&c.id));
        Ok((before - rows.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    rows: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, RepoError> {
        Ok(self.rows.read().await.iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|u| u.username == user.username) {
            return Err(RepoError::Duplicate(USER_EXISTS.to_string()));
        }
        rows.push(user.clone());
        Ok(user)
    }
}

/// A blog store whose every call fails, for exercising persistence-failure
/// paths.
pub struct FailingBlogs;

#[async_trait]
impl BlogRepository for FailingBlogs {
    async fn find_all(&self) -> Result<Vec<Blog>, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }

    async fn find_by_id(&self, _id: &ObjectId) -> Result<Option<Blog>, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }

    async fn create(&self, _blog: Blog) -> Result<Blog, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }

    async fn update(&self, _id: &ObjectId, _changes: BlogForm) -> Result<Option<Blog>, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }

    async fn delete(&self, _id: &ObjectId) -> Result<Option<Blog>, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }

    async fn push_comment(&self, _id: &ObjectId, _comment_id: &ObjectId) -> Result<bool, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }

    async fn pull_comment(&self, _id: &ObjectId, _comment_id: &ObjectId) -> Result<bool, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }
}

/// A comment store whose every call fails.
pub struct FailingComments;

#[async_trait]
impl CommentRepository for FailingComments {
    async fn find_by_id(&self, _id: &ObjectId) -> Result<Option<Comment>, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }

    async fn find_many(&self, _ids: &[ObjectId]) -> Result<Vec<Comment>, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }

    async fn create(&self, _comment: Comment) -> Result<Comment, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }

    async fn update_text(&self, _id: &ObjectId, _text: String) -> Result<Option<Comment>, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }

    async fn delete(&self, _id: &ObjectId) -> Result<bool, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }

    async fn delete_many(&self, _ids: &[ObjectId]) -> Result<u64, RepoError> {
        Err(RepoError::Database("unreachable".into()))
    }
}

/// Reads and inserts go to an in-memory store; every write to an existing
/// blog fails.
#[derive(Default)]
pub struct FlakyBlogs {
    inner: MemoryBlogs,
}

#[async_trait]
impl BlogRepository for FlakyBlogs {
    async fn find_all(&self) -> Result<Vec<Blog>, RepoError> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Blog>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn create(&self, blog: Blog) -> Result<Blog, RepoError> {
        self.inner.create(blog).await
    }

    async fn update(&self, _id: &ObjectId, _changes: BlogForm) -> Result<Option<Blog>, RepoError> {
        Err(RepoError::Database("write rejected".into()))
    }

    async fn delete(&self, _id: &ObjectId) -> Result<Option<Blog>, RepoError> {
        Err(RepoError::Database("write rejected".into()))
    }

    async fn push_comment(&self, _id: &ObjectId, _comment_id: &ObjectId) -> Result<bool, RepoError> {
        Err(RepoError::Database("write rejected".into()))
    }

    async fn pull_comment(&self, _id: &ObjectId, _comment_id: &ObjectId) -> Result<bool, RepoError> {
        Err(RepoError::Database("write rejected".into()))
    }
}

/// Reads and inserts go to an in-memory store; every write to an existing
/// comment fails.
#[derive(Default)]
pub struct FlakyComments {
    inner: MemoryComments,
}

#[async_trait]
impl CommentRepository for FlakyComments {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Comment>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<Comment>, RepoError> {
        self.inner.find_many(ids).await
    }

    async fn create(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.inner.create(comment).await
    }

    async fn update_text(&self, _id: &ObjectId, _text: String) -> Result<Option<Comment>, RepoError> {
        Err(RepoError::Database("write rejected".into()))
    }

    async fn delete(&self, _id: &ObjectId) -> Result<bool, RepoError> {
        Err(RepoError::Database("write rejected".into()))
    }

    async fn delete_many(&self, _ids: &[ObjectId]) -> Result<u64, RepoError> {
        Err(RepoError::Database("write rejected".into()))
    }
}
