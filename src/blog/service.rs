use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use crate::blog::model::{Blog, BlogForm};
use crate::database::repository::{BlogRepository, RepoError};

pub struct BlogService {
    collection: Collection<Blog>,
}

impl BlogService {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Blog>("blogs");
        BlogService { collection }
    }
}

/// Builds the `$set` document for a partial update, or `None` when nothing
/// was supplied.
fn set_document(changes: BlogForm) -> Option<Document> {
    if changes.is_empty() {
        return None;
    }

    let mut set = Document::new();
    if let Some(title) = changes.title {
        set.insert("title", title);
    }
    if let Some(image) = changes.image {
        set.insert("image", image);
    }
    if let Some(body) = changes.body {
        set.insert("body", body);
    }
    Some(set)
}

#[async_trait]
impl BlogRepository for BlogService {
    async fn find_all(&self) -> Result<Vec<Blog>, RepoError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Blog>, RepoError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn create(&self, blog: Blog) -> Result<Blog, RepoError> {
        self.collection.insert_one(&blog).await?;
        Ok(blog)
    }

    async fn update(&self, id: &ObjectId, changes: BlogForm) -> Result<Option<Blog>, RepoError> {
        let Some(set) = set_document(changes) else {
            return self.find_by_id(id).await;
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    async fn delete(&self, id: &ObjectId) -> Result<Option<Blog>, RepoError> {
        Ok(self.collection.find_one_and_delete(doc! { "_id": id }).await?)
    }

    async fn push_comment(&self, id: &ObjectId, comment_id: &ObjectId) -> Result<bool, RepoError> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$push": { "comments": comment_id } })
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn pull_comment(&self, id: &ObjectId, comment_id: &ObjectId) -> Result<bool, RepoError> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$pull": { "comments": comment_id } })
            .await?;
        Ok(result.matched_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_document_only_contains_supplied_fields() {
        let set = set_document(BlogForm {
            title: Some("X".into()),
            image: None,
            body: None,
        })
        .unwrap();
        assert_eq!(set, doc! { "title": "X" });
    }

    #[test]
    fn set_document_is_none_without_changes() {
        assert!(set_document(BlogForm::default()).is_none());
    }
}
