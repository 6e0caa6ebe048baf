use actix_web::{HttpResponse, web};

use crate::blog::controller::find_blog_or_redirect;
use crate::comment::model::{Comment, CommentForm};
use crate::middleware::auth::{
    BLOG_NOT_FOUND, COMMENT_NOT_FOUND, check_comment_ownership, is_logged_in,
};
use crate::middleware::session::RequestContext;
use crate::state::AppState;
use crate::utils::error::{CustomError, GENERIC_FAILURE};
use crate::utils::helpers::redirect;
use crate::utils::sanitize::sanitize_text;
use crate::views::{self, Page, html};

pub const EMPTY_COMMENT: &str = "Comment content cannot be empty";

/// GET /blogs/{id}/comments/new
pub async fn new_comment_form(
    ctx: RequestContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, CustomError> {
    is_logged_in(&ctx)?;
    let blog = find_blog_or_redirect(&ctx, &state, &path).await?;
    Ok(html(views::comments::new_form(&Page::new(&ctx, &state), &blog)))
}

/// POST /blogs/{id}/comments
pub async fn create_comment(
    ctx: RequestContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, CustomError> {
    let user = is_logged_in(&ctx)?;
    let blog = find_blog_or_redirect(&ctx, &state, &path).await?;
    let blog_url = format!("/blogs/{}", blog.id.to_hex());

    let text = sanitize_text(&form.text);
    if text.trim().is_empty() {
        ctx.flash_error(EMPTY_COMMENT);
        return Ok(redirect(format!("{}/comments/new", blog_url)));
    }

    let comment = match state.comments.create(Comment::new(text, user.as_author())).await {
        Ok(comment) => comment,
        Err(e) => {
            log::error!("failed to create comment on blog {}: {}", blog.id, e);
            ctx.flash_error(GENERIC_FAILURE);
            return Ok(redirect(blog_url));
        }
    };

    match state.blogs.push_comment(&blog.id, &comment.id).await {
        Ok(true) => {
            ctx.flash_success("Successfully added comment!");
            Ok(redirect(blog_url))
        }
        outcome => {
            // Without the reference the comment would never be shown.
            if let Err(e) = state.comments.delete(&comment.id).await {
                log::error!("failed to discard orphan comment {}: {}", comment.id, e);
            }
            match outcome {
                Err(e) => {
                    log::error!("failed to attach comment {} to blog {}: {}", comment.id, blog.id, e);
                    ctx.flash_error(GENERIC_FAILURE);
                    Ok(redirect(blog_url))
                }
                _ => {
                    ctx.flash_error(BLOG_NOT_FOUND);
                    Ok(redirect("/blogs"))
                }
            }
        }
    }
}

/// GET /blogs/{id}/comments/{comment_id}/edit
pub async fn edit_comment_form(
    ctx: RequestContext,
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, CustomError> {
    let (blog_id, comment_id) = path.into_inner();
    let (blog, comment) = check_comment_ownership(&ctx, &state, &blog_id, &comment_id).await?;
    Ok(html(views::comments::edit_form(
        &Page::new(&ctx, &state),
        &blog.id.to_hex(),
        &comment,
    )))
}

/// PUT /blogs/{id}/comments/{comment_id}
pub async fn update_comment(
    ctx: RequestContext,
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, CustomError> {
    let (blog_id, comment_id) = path.into_inner();
    let (blog, comment) = check_comment_ownership(&ctx, &state, &blog_id, &comment_id).await?;
    let blog_url = format!("/blogs/{}", blog.id.to_hex());

    let text = sanitize_text(&form.text);
    if text.trim().is_empty() {
        ctx.flash_error(EMPTY_COMMENT);
        return Ok(redirect(ctx.back_or(&blog_url)));
    }

    match state.comments.update_text(&comment.id, text).await {
        Ok(Some(_)) => {
            ctx.flash_success("Successfully edited comment!");
            Ok(redirect(blog_url))
        }
        Ok(None) => {
            ctx.flash_error(COMMENT_NOT_FOUND);
            Ok(redirect(ctx.back_or(&blog_url)))
        }
        Err(e) => {
            log::error!("failed to update comment {}: {}", comment.id, e);
            ctx.flash_error(GENERIC_FAILURE);
            Ok(redirect(ctx.back_or(&blog_url)))
        }
    }
}

/// DELETE /blogs/{id}/comments/{comment_id}
pub async fn delete_comment(
    ctx: RequestContext,
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, CustomError> {
    let (blog_id, comment_id) = path.into_inner();
    let (blog, comment) = check_comment_ownership(&ctx, &state, &blog_id, &comment_id).await?;
    let blog_url = format!("/blogs/{}", blog.id.to_hex());

    if let Err(e) = state.comments.delete(&comment.id).await {
        log::error!("failed to delete comment {}: {}", comment.id, e);
        ctx.flash_error(GENERIC_FAILURE);
        return Ok(redirect(ctx.back_or(&blog_url)));
    }

    if let Err(e) = state.blogs.pull_comment(&blog.id, &comment.id).await {
        log::error!("failed to detach comment {} from blog {}: {}", comment.id, blog.id, e);
    }

    ctx.flash_success("Successfully deleted comment");
    Ok(redirect(blog_url))
}
