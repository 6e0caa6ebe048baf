//! Registration and credential checks, independent of the store.

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::database::repository::UserRepository;
use crate::utils::error::CustomError;
use crate::utils::hashing;
use crate::user::model::User;

pub const MISSING_USERNAME: &str = "No username was given";
pub const MISSING_PASSWORD: &str = "No password was given";
pub const USER_EXISTS: &str = "A user with the given username is already registered";

pub async fn register(
    users: &dyn UserRepository,
    username: &str,
    password: &str,
    cost: u32,
) -> Result<User, CustomError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(CustomError::BadRequestError(MISSING_USERNAME.to_string()));
    }
    if password.is_empty() {
        return Err(CustomError::BadRequestError(MISSING_PASSWORD.to_string()));
    }

    let password = hashing::hash_password(password, cost)
        .map_err(|e| CustomError::InternalServerError(e.to_string()))?;

    let user = User {
        id: ObjectId::new(),
        username: username.to_string(),
        password,
        created: Utc::now(),
    };

    Ok(users.create(user).await?)
}

/// Returns the user when the credentials match, `None` when they do not.
pub async fn authenticate(
    users: &dyn UserRepository,
    username: &str,
    password: &str,
) -> Result<Option<User>, CustomError> {
    let Some(user) = users.find_by_username(username.trim()).await? else {
        return Ok(None);
    };

    // A corrupt hash is treated as a failed login rather than a server error.
    match hashing::verify_password(password, &user.password) {
        Ok(true) => Ok(Some(user)),
        Ok(false) => Ok(None),
        Err(e) => {
            log::warn!("unreadable password hash for user {}: {}", user.id, e);
            Ok(None)
        }
    }
}
