//! Authentication and ownership guards.
//!
//! Each guard either hands back what the handler needs (the current user, or
//! the loaded resource) or queues an error notice and returns
//! [`CustomError::Redirect`], which the handler propagates with `?`.

use crate::blog::model::Blog;
use crate::comment::model::Comment;
use crate::middleware::session::{CurrentUser, RequestContext};
use crate::state::AppState;
use crate::utils::error::CustomError;
use crate::utils::helpers::parse_id;

pub const LOGIN_REQUIRED: &str = "You need to be logged in!";
pub const LOGIN_REQUIRED_FOR_ACTION: &str = "You need to be logged in to do that!";
pub const NO_PERMISSION: &str = "You don't have permission to do that!";
pub const BLOG_NOT_FOUND: &str = "Blog not found";
pub const COMMENT_NOT_FOUND: &str = "Comment not found";

/// A record created by, and only mutable by, one user.
pub trait Owned {
    type Id: Eq;

    fn owner_id(&self) -> &Self::Id;
}

pub fn is_owned_by<R: Owned>(resource: &R, identity: &R::Id) -> bool {
    resource.owner_id() == identity
}

pub fn is_logged_in(ctx: &RequestContext) -> Result<&CurrentUser, CustomError> {
    match ctx.user() {
        Some(user) => Ok(user),
        None => {
            ctx.flash_error(LOGIN_REQUIRED);
            Err(CustomError::redirect("/login"))
        }
    }
}

fn require_user_for_action(ctx: &RequestContext) -> Result<&CurrentUser, CustomError> {
    match ctx.user() {
        Some(user) => Ok(user),
        None => {
            ctx.flash_error(LOGIN_REQUIRED_FOR_ACTION);
            Err(CustomError::redirect(ctx.back_or("/login")))
        }
    }
}

fn reject(ctx: &RequestContext, notice: &str) -> CustomError {
    ctx.flash_error(notice);
    CustomError::redirect(ctx.back_or("/blogs"))
}

/// Looks up a blog for a guard; a malformed id counts as missing.
async fn find_blog(state: &AppState, raw_id: &str) -> Option<Blog> {
    let id = parse_id(raw_id)?;
    match state.blogs.find_by_id(&id).await {
        Ok(found) => found,
        Err(e) => {
            log::error!("blog lookup for {} failed: {}", id, e);
            None
        }
    }
}

/// Lets the request through only when the current user created the blog.
/// Returns the loaded blog so the handler need not fetch it again.
pub async fn check_blog_ownership(
    ctx: &RequestContext,
    state: &AppState,
    blog_id: &str,
) -> Result<Blog, CustomError> {
    let user = require_user_for_action(ctx)?;

    let Some(blog) = find_blog(state, blog_id).await else {
        return Err(reject(ctx, BLOG_NOT_FOUND));
    };

    if !is_owned_by(&blog, &user.id) {
        log::debug!("user {} denied access to blog {}", user.id, blog.id);
        return Err(reject(ctx, NO_PERMISSION));
    }

    Ok(blog)
}

/// Lets the request through only when the current user wrote the comment and
/// the comment belongs to the blog named in the same path.
pub async fn check_comment_ownership(
    ctx: &RequestContext,
    state: &AppState,
    blog_id: &str,
    comment_id: &str,
) -> Result<(Blog, Comment), CustomError> {
    let user = require_user_for_action(ctx)?;

    let Some(comment_id) = parse_id(comment_id) else {
        return Err(reject(ctx, COMMENT_NOT_FOUND));
    };

    let comment = match state.comments.find_by_id(&comment_id).await {
        Ok(Some(comment)) => comment,
        Ok(None) => return Err(reject(ctx, COMMENT_NOT_FOUND)),
        Err(e) => {
            log::error!("comment lookup for {} failed: {}", comment_id, e);
            return Err(reject(ctx, COMMENT_NOT_FOUND));
        }
    };

    let blog = match find_blog(state, blog_id).await {
        Some(blog) if blog.comments.contains(&comment.id) => blog,
        _ => return Err(reject(ctx, COMMENT_NOT_FOUND)),
    };

    if !is_owned_by(&comment, &user.id) {
        log::debug!("user {} denied access to comment {}", user.id, comment.id);
        return Err(reject(ctx, NO_PERMISSION));
    }

    Ok((blog, comment))
}
