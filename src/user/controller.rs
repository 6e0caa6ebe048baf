use actix_web::{HttpResponse, http::StatusCode, web};

use crate::middleware::session::RequestContext;
use crate::state::AppState;
use crate::user::account;
use crate::user::model::CredentialsForm;
use crate::utils::error::CustomError;
use crate::utils::helpers::redirect;
use crate::views::{self, Page, html, html_with_status};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// GET /register
pub async fn register_form(ctx: RequestContext, state: web::Data<AppState>) -> HttpResponse {
    html(views::auth::register(&Page::new(&ctx, &state)))
}

/// POST /register
pub async fn register_user(
    ctx: RequestContext,
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, CustomError> {
    let registered = account::register(
        state.users.as_ref(),
        &form.username,
        &form.password,
        state.bcrypt_cost,
    )
    .await;

    match registered {
        Ok(user) => {
            log::info!("registered user {} ({})", user.username, user.id);
            ctx.log_in(&user)?;
            ctx.flash_success(format!("Welcome to {}, {}!", state.site_name, user.username));
            Ok(redirect("/blogs"))
        }
        Err(CustomError::BadRequestError(msg)) => {
            let page = Page::new(&ctx, &state).with_error(msg);
            Ok(html_with_status(StatusCode::BAD_REQUEST, views::auth::register(&page)))
        }
        Err(CustomError::ConflictError(msg)) => {
            let page = Page::new(&ctx, &state).with_error(msg);
            Ok(html_with_status(StatusCode::CONFLICT, views::auth::register(&page)))
        }
        Err(err) => Err(err),
    }
}

/// GET /login
pub async fn login_form(ctx: RequestContext, state: web::Data<AppState>) -> HttpResponse {
    html(views::auth::login(&Page::new(&ctx, &state)))
}

/// POST /login
pub async fn login_user(
    ctx: RequestContext,
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, CustomError> {
    match account::authenticate(state.users.as_ref(), &form.username, &form.password).await? {
        Some(user) => {
            ctx.log_in(&user)?;
            ctx.flash_success(format!("Welcome to {}!", state.site_name));
            Ok(redirect("/blogs"))
        }
        None => {
            log::debug!("failed login for {}", form.username);
            ctx.flash_error(INVALID_CREDENTIALS);
            Ok(redirect("/login"))
        }
    }
}

/// GET /logout
pub async fn logout_user(ctx: RequestContext) -> HttpResponse {
    ctx.log_out();
    ctx.flash_success("Logged You Out!");
    redirect("/blogs")
}
