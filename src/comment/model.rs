use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::blog::model::Author;
use crate::middleware::auth::Owned;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub text: String,
    pub author: Author,
    pub created: DateTime<Utc>,
}

impl Comment {
    pub fn new(text: String, author: Author) -> Self {
        Comment {
            id: ObjectId::new(),
            text,
            author,
            created: Utc::now(),
        }
    }
}

impl Owned for Comment {
    type Id = ObjectId;

    fn owner_id(&self) -> &ObjectId {
        &self.author.id
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct CommentForm {
    #[serde(rename = "comment[text]", default)]
    pub text: String,
}
