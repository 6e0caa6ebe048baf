use actix_web::{HttpResponse, http::StatusCode, web};

use crate::blog::model::{Blog, BlogForm, PopulatedBlog};
use crate::middleware::auth::{BLOG_NOT_FOUND, check_blog_ownership, is_logged_in};
use crate::middleware::session::RequestContext;
use crate::state::AppState;
use crate::utils::error::{CustomError, GENERIC_FAILURE};
use crate::utils::helpers::{parse_id, redirect};
use crate::utils::sanitize::sanitize;
use crate::views::{self, Page, html, html_with_status};

pub async fn root() -> HttpResponse {
    redirect("/blogs")
}

/// Loads a blog for a read-only page. A missing blog and a failed lookup both
/// send the user back to the list, each with its own notice.
pub(crate) async fn find_blog_or_redirect(
    ctx: &RequestContext,
    state: &AppState,
    raw_id: &str,
) -> Result<Blog, CustomError> {
    let found = match parse_id(raw_id) {
        Some(id) => state.blogs.find_by_id(&id).await,
        None => Ok(None),
    };

    match found {
        Ok(Some(blog)) => Ok(blog),
        Ok(None) => {
            ctx.flash_error(BLOG_NOT_FOUND);
            Err(CustomError::redirect("/blogs"))
        }
        Err(e) => {
            log::error!("failed to load blog {}: {}", raw_id, e);
            ctx.flash_error(GENERIC_FAILURE);
            Err(CustomError::redirect("/blogs"))
        }
    }
}

/// GET /blogs
pub async fn list_blogs(
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, CustomError> {
    let blogs = state.blogs.find_all().await?;
    Ok(html(views::blogs::index(&Page::new(&ctx, &state), &blogs)))
}

/// GET /blogs/new
pub async fn new_blog_form(
    ctx: RequestContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, CustomError> {
    is_logged_in(&ctx)?;
    Ok(html(views::blogs::new_form(&Page::new(&ctx, &state))))
}

/// POST /blogs
pub async fn create_blog(
    ctx: RequestContext,
    state: web::Data<AppState>,
    form: web::Form<BlogForm>,
) -> Result<HttpResponse, CustomError> {
    let user = is_logged_in(&ctx)?;

    let mut form = form.into_inner();
    form.body = form.body.as_deref().map(sanitize);

    // The author always comes from the session, never from the form.
    let blog = Blog::new(form, user.as_author());

    match state.blogs.create(blog).await {
        Ok(blog) => {
            log::info!("user {} created blog {}", user.id, blog.id);
            Ok(redirect("/blogs"))
        }
        Err(e) => {
            log::error!("failed to create blog for user {}: {}", user.id, e);
            let page = Page::new(&ctx, &state).with_error(GENERIC_FAILURE);
            Ok(html_with_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                views::blogs::new_form(&page),
            ))
        }
    }
}

/// GET /blogs/{id}
pub async fn show_blog(
    ctx: RequestContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, CustomError> {
    is_logged_in(&ctx)?;
    let blog = find_blog_or_redirect(&ctx, &state, &path).await?;

    let comments = match state.comments.find_many(&blog.comments).await {
        Ok(comments) => comments,
        Err(e) => {
            log::error!("failed to load comments of blog {}: {}", blog.id, e);
            ctx.flash_error(GENERIC_FAILURE);
            return Ok(redirect("/blogs"));
        }
    };

    let populated = PopulatedBlog::assemble(blog, comments);
    Ok(html(views::blogs::show(&Page::new(&ctx, &state), &populated)))
}

/// GET /blogs/{id}/edit
pub async fn edit_blog_form(
    ctx: RequestContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, CustomError> {
    let blog = check_blog_ownership(&ctx, &state, &path).await?;
    Ok(html(views::blogs::edit_form(&Page::new(&ctx, &state), &blog)))
}

/// PUT /blogs/{id}
pub async fn update_blog(
    ctx: RequestContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<BlogForm>,
) -> Result<HttpResponse, CustomError> {
    let blog = check_blog_ownership(&ctx, &state, &path).await?;

    let mut changes = form.into_inner();
    changes.body = changes.body.as_deref().map(sanitize);

    match state.blogs.update(&blog.id, changes).await {
        Ok(Some(updated)) => Ok(redirect(format!("/blogs/{}", updated.id.to_hex()))),
        Ok(None) => {
            ctx.flash_error(BLOG_NOT_FOUND);
            Ok(redirect("/blogs"))
        }
        Err(e) => {
            log::error!("failed to update blog {}: {}", blog.id, e);
            ctx.flash_error(GENERIC_FAILURE);
            Ok(redirect("/blogs"))
        }
    }
}

/// DELETE /blogs/{id}
///
/// Always lands on the list; the notice tells the user how it went.
pub async fn delete_blog(
    ctx: RequestContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, CustomError> {
    let blog = check_blog_ownership(&ctx, &state, &path).await?;

    match state.blogs.delete(&blog.id).await {
        Ok(Some(removed)) => {
            if let Err(e) = state.comments.delete_many(&removed.comments).await {
                log::error!("failed to delete comments of blog {}: {}", removed.id, e);
            }
            log::info!("blog {} deleted", removed.id);
            ctx.flash_success("Successfully deleted blog");
        }
        Ok(None) => log::debug!("blog {} was already gone", blog.id),
        Err(e) => {
            log::error!("failed to delete blog {}: {}", blog.id, e);
            ctx.flash_error(GENERIC_FAILURE);
        }
    }

    Ok(redirect("/blogs"))
}
