use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteError, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use crate::database::repository::{RepoError, UserRepository};
use crate::user::account::USER_EXISTS;
use crate::user::model::User;

const DUPLICATE_KEY: i32 = 11000;

pub struct UserService {
    collection: Collection<User>,
}

impl UserService {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<User>("users");
        UserService { collection }
    }

    /// Usernames are unique; the index backs up the existence check done
    /// before inserting.
    pub async fn ensure_indexes(&self) -> Result<(), RepoError> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, RepoError> {
        let count = self
            .collection
            .count_documents(doc! { "username": username })
            .await?;
        Ok(count > 0)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(WriteError { code: DUPLICATE_KEY, .. }))
    )
}

#[async_trait]
impl UserRepository for UserService {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, RepoError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .collection
            .find_one(doc! { "username": username })
            .await?)
    }

    async fn create(&self, user: User) -> Result<User, RepoError> {
        if self.username_exists(&user.username).await? {
            return Err(RepoError::Duplicate(USER_EXISTS.to_string()));
        }

        match self.collection.insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key(&e) => Err(RepoError::Duplicate(USER_EXISTS.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
