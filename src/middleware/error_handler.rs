use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, Result};

use crate::utils::error::GENERIC_FAILURE;
use crate::views;

fn is_html<B>(res: &ServiceResponse<B>) -> bool {
    res.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html"))
}

/// Wraps framework-generated errors (bad form payloads, unsupported methods)
/// in the site's HTML error page. Pages rendered by the app pass through.
pub fn handle_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    if is_html(&res) {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let status = res.status();
    let message = if status.is_server_error() {
        if let Some(err) = res.response().error() {
            log::error!("{} {}: {}", res.request().method(), res.request().path(), err);
        }
        GENERIC_FAILURE.to_string()
    } else {
        res.response()
            .error()
            .map(|e| e.to_string())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Error").to_string())
    };

    let new_response = HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(views::error_page(status, &message));

    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(req, new_response.map_into_right_body());

    Ok(ErrorHandlerResponse::Response(res))
}
