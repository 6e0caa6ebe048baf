//! HTML pages. Every interpolated value goes through [`escape`] except a blog
//! body, which is sanitized before it is stored.

pub mod auth;
pub mod blogs;
pub mod comments;

use std::fmt::Write;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::middleware::session::{CurrentUser, Notice, NoticeKind, RequestContext};
use crate::state::AppState;

/// What every page needs besides its own content.
pub struct Page<'a> {
    pub site_name: &'a str,
    pub user: Option<&'a CurrentUser>,
    pub notices: Vec<Notice>,
}

impl<'a> Page<'a> {
    pub fn new(ctx: &'a RequestContext, state: &'a AppState) -> Self {
        Page {
            site_name: &state.site_name,
            user: ctx.user(),
            notices: ctx.notices().to_vec(),
        }
    }

    /// Adds a notice for this render only, for pages re-shown after a failed
    /// submission.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.notices.push(Notice::error(message));
        self
    }
}

/// Encodes text for any element or attribute context.
pub fn escape(raw: &str) -> String {
    ammonia::clean_text(raw)
}

pub fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub fn html_with_status(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn nav(page: &Page) -> String {
    let right = match page.user {
        Some(user) => format!(
            r#"<span class="nav-user">Signed in as {}</span> <a href="/logout">Logout</a>"#,
            escape(&user.username)
        ),
        None => r#"<a href="/login">Login</a> <a href="/register">Sign Up</a>"#.to_string(),
    };
    format!(
        r#"<nav><a class="brand" href="/blogs">{}</a> <a href="/blogs/new">New Post</a> <span class="nav-right">{}</span></nav>"#,
        escape(page.site_name),
        right
    )
}

fn notices(page: &Page) -> String {
    let mut out = String::new();
    for notice in &page.notices {
        let class = match notice.kind {
            NoticeKind::Error => "notice notice-error",
            NoticeKind::Success => "notice notice-success",
        };
        let _ = write!(out, r#"<div class="{}">{}</div>"#, class, escape(&notice.message));
    }
    out
}

pub fn layout(page: &Page, title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | {site}</title>
<style>
body {{ font-family: sans-serif; max-width: 52rem; margin: 0 auto; padding: 0 1rem; }}
nav {{ display: flex; gap: 1rem; padding: 1rem 0; border-bottom: 1px solid #ddd; }}
.nav-right {{ margin-left: auto; }}
.notice {{ padding: .5rem 1rem; margin: 1rem 0; border-radius: 4px; }}
.notice-error {{ background: #fde2e2; }}
.notice-success {{ background: #e2f6e2; }}
img {{ max-width: 100%; }}
form.inline {{ display: inline; }}
</style>
</head>
<body>
{nav}
{notices}
<main>
{content}
</main>
</body>
</html>
"#,
        title = escape(title),
        site = escape(page.site_name),
        nav = nav(page),
        notices = notices(page),
        content = content,
    )
}

/// Standalone error page; does not depend on a request context so it can be
/// produced from error handlers.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{code} {reason}</title></head>
<body>
<h1>{code} {reason}</h1>
<p>{message}</p>
<p><a href="/blogs">Back to all posts</a></p>
</body>
</html>
"#,
        code = status.as_u16(),
        reason = escape(reason),
        message = escape(message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        let out = escape(r#"<a href="x">Tom & 'Jerry'</a>"#);
        for c in ['<', '>', '"', '\''] {
            assert!(!out.contains(c), "{c} left in {out}");
        }
        assert!(out.contains("&lt;a"));
        assert!(out.contains("Tom&#32;&amp;"));
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn layout_shows_notices_and_nav_for_visitors() {
        let page = Page {
            site_name: "Disrupter",
            user: None,
            notices: vec![Notice::error("<b>bad</b>"), Notice::success("good")],
        };
        let out = layout(&page, "Home", "<p>content</p>");
        assert!(out.contains(&escape("<b>bad</b>")));
        assert!(!out.contains("<b>bad"));
        assert!(out.contains(r#"<div class="notice notice-success">good</div>"#));
        assert!(out.contains(r#"href="/login""#));
        assert!(out.contains("<p>content</p>"));
    }
}
