use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::comment::model::Comment;
use crate::middleware::auth::Owned;

/// Denormalized reference to the user who created a blog or comment.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Author {
    pub id: ObjectId,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub image: String,
    pub body: String,
    pub created: DateTime<Utc>,
    pub author: Author,
    /// Comment ids in the order they were added.
    #[serde(default)]
    pub comments: Vec<ObjectId>,
}

impl Blog {
    pub fn new(form: BlogForm, author: Author) -> Self {
        Blog {
            id: ObjectId::new(),
            title: form.title.unwrap_or_default(),
            image: form.image.unwrap_or_default(),
            body: form.body.unwrap_or_default(),
            created: Utc::now(),
            author,
            comments: Vec::new(),
        }
    }
}

impl Owned for Blog {
    type Id = ObjectId;

    fn owner_id(&self) -> &ObjectId {
        &self.author.id
    }
}

/// Blog fields as submitted by the new/edit forms. Every field is optional so
/// the same shape serves partial updates; author fields are deliberately
/// absent and anything the client sends for them is ignored.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct BlogForm {
    #[serde(rename = "blog[title]")]
    pub title: Option<String>,
    #[serde(rename = "blog[image]")]
    pub image: Option<String>,
    #[serde(rename = "blog[body]")]
    pub body: Option<String>,
}

impl BlogForm {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.image.is_none() && self.body.is_none()
    }
}

/// A blog with its comment references resolved, for the show page.
#[derive(Debug, Clone)]
pub struct PopulatedBlog {
    pub blog: Blog,
    pub comments: Vec<Comment>,
}

impl PopulatedBlog {
    /// Orders `found` by the blog's reference list, skipping references whose
    /// comment no longer exists.
    pub fn assemble(blog: Blog, mut found: Vec<Comment>) -> Self {
        let mut comments = Vec::with_capacity(blog.comments.len());
        for id in &blog.comments {
            if let Some(pos) = found.iter().position(|c| &c.id == id) {
                comments.push(found.swap_remove(pos));
            }
        }
        PopulatedBlog { blog, comments }
    }
}
