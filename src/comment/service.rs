use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use crate::comment::model::Comment;
use crate::database::repository::{CommentRepository, RepoError};

pub struct CommentService {
    collection: Collection<Comment>,
}

impl CommentService {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Comment>("comments");
        CommentService { collection }
    }
}

#[async_trait]
impl CommentRepository for CommentService {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Comment>, RepoError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_many(&self, ids: &[ObjectId]) -> Result<Vec<Comment>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn create(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.collection.insert_one(&comment).await?;
        Ok(comment)
    }

    async fn update_text(&self, id: &ObjectId, text: String) -> Result<Option<Comment>, RepoError> {
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": { "text": text } })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, RepoError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_many(&self, ids: &[ObjectId]) -> Result<u64, RepoError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = self
            .collection
            .delete_many(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(result.deleted_count)
    }
}
