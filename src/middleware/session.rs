//! Per-request context: the resolved identity plus flash notices.
//!
//! Handlers receive a [`RequestContext`] instead of reading the session
//! directly. The identity is re-resolved against the user store on every
//! request, so a deleted account stops being signed in.

use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionExt, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::http::{Uri, header};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::blog::model::Author;
use crate::state::AppState;
use crate::user::model::User;
use crate::utils::error::CustomError;

pub const SESSION_COOKIE: &str = "blog_session";
const USER_ID_KEY: &str = "user_id";
const FLASH_KEY: &str = "flash";

/// Cookie-backed sessions: the whole session (user id and pending notices)
/// lives in one encrypted cookie, so no server-side store is needed.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_path("/".into())
        .cookie_secure(secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// The signed-in user as seen by handlers and views.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: ObjectId,
    pub username: String,
}

impl CurrentUser {
    /// Author stamp for records this user creates.
    pub fn as_author(&self) -> Author {
        Author {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        CurrentUser {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Error,
    Success,
}

/// One-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }
}

pub struct RequestContext {
    user: Option<CurrentUser>,
    /// Notices queued by the previous request, consumed by this one.
    notices: Vec<Notice>,
    referer: Option<String>,
    session: Session,
}

impl RequestContext {
    pub fn new(session: Session, user: Option<CurrentUser>, referer: Option<String>) -> Self {
        let notices = match session.remove_as::<Vec<Notice>>(FLASH_KEY) {
            Some(Ok(notices)) => notices,
            Some(Err(raw)) => {
                log::warn!("discarding unreadable flash notices: {}", raw);
                Vec::new()
            }
            None => Vec::new(),
        };

        RequestContext {
            user,
            notices,
            referer,
            session,
        }
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn flash_error(&self, message: impl Into<String>) {
        self.flash(Notice::error(message));
    }

    pub fn flash_success(&self, message: impl Into<String>) {
        self.flash(Notice::success(message));
    }

    fn flash(&self, notice: Notice) {
        let mut pending = self
            .session
            .get::<Vec<Notice>>(FLASH_KEY)
            .ok()
            .flatten()
            .unwrap_or_default();
        pending.push(notice);
        if let Err(e) = self.session.insert(FLASH_KEY, pending) {
            log::error!("failed to store flash notice: {}", e);
        }
    }

    /// The same-site page the request came from, or `fallback`.
    pub fn back_or(&self, fallback: &str) -> String {
        self.referer.clone().unwrap_or_else(|| fallback.to_string())
    }

    /// Stores the user id and issues a fresh session cookie.
    pub fn log_in(&self, user: &User) -> Result<(), CustomError> {
        self.session
            .insert(USER_ID_KEY, user.id.to_hex())
            .map_err(|e| CustomError::InternalServerError(format!("failed to persist session: {}", e)))?;
        self.session.renew();
        Ok(())
    }

    /// Forgets the user and issues a fresh session cookie. Pending notices
    /// survive so the next page can confirm the logout.
    pub fn log_out(&self) {
        self.session.remove(USER_ID_KEY);
        self.session.renew();
    }

    #[cfg(test)]
    pub fn session_for_tests(&self) -> Session {
        self.session.clone()
    }
}

/// Extracts the path of a `Referer` that points back at this host.
fn same_site_referer(req: &HttpRequest) -> Option<String> {
    let raw = req.headers().get(header::REFERER)?.to_str().ok()?;
    let uri: Uri = raw.parse().ok()?;

    if let Some(authority) = uri.authority() {
        if authority.as_str() != req.connection_info().host() {
            return None;
        }
    }

    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .filter(|path| path.starts_with('/'))
}

async fn resolve_user(session: &Session, state: &AppState) -> Result<Option<CurrentUser>, CustomError> {
    let raw = session
        .get::<String>(USER_ID_KEY)
        .map_err(|e| CustomError::InternalServerError(format!("failed to read session: {}", e)))?;

    let Some(raw) = raw else {
        return Ok(None);
    };

    let Ok(id) = ObjectId::parse_str(&raw) else {
        log::warn!("invalid user id in session cookie: {}", raw);
        session.remove(USER_ID_KEY);
        return Ok(None);
    };

    match state.users.find_by_id(&id).await? {
        Some(user) => Ok(Some(CurrentUser::from(&user))),
        None => {
            log::debug!("session refers to missing user {}", id);
            session.remove(USER_ID_KEY);
            Ok(None)
        }
    }
}

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req.get_session();
        let referer = same_site_referer(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                CustomError::InternalServerError("application state is not configured".into())
            })?;
            let user = resolve_user(&session, &state).await?;
            Ok(RequestContext::new(session, user, referer))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::SessionStatus;
    use actix_web::test::TestRequest;

    fn user() -> User {
        User {
            id: ObjectId::new(),
            username: "alice".into(),
            password: "hash".into(),
            created: chrono::Utc::now(),
        }
    }

    #[actix_web::test]
    async fn log_in_and_log_out_both_renew_the_session() {
        let req = TestRequest::default().to_http_request();
        let ctx = RequestContext::new(req.get_session(), None, None);
        let alice = user();

        ctx.log_in(&alice).unwrap();
        let session = ctx.session_for_tests();
        assert!(matches!(session.status(), SessionStatus::Renewed));
        assert_eq!(
            session.get::<String>(USER_ID_KEY).unwrap(),
            Some(alice.id.to_hex())
        );

        let req = TestRequest::default().to_http_request();
        let ctx = RequestContext::new(req.get_session(), None, None);
        ctx.session_for_tests()
            .insert(USER_ID_KEY, alice.id.to_hex())
            .unwrap();
        ctx.log_out();
        ctx.flash_success("bye");

        let session = ctx.session_for_tests();
        assert!(matches!(session.status(), SessionStatus::Renewed));
        assert_eq!(session.get::<String>(USER_ID_KEY).unwrap(), None);
        let next = RequestContext::new(session, None, None);
        assert_eq!(next.notices(), &[Notice::success("bye")]);
    }

    #[actix_web::test]
    async fn flash_notices_are_consumed_once() {
        let req = TestRequest::default().to_http_request();
        let session = req.get_session();

        let first = RequestContext::new(session.clone(), None, None);
        assert!(first.notices().is_empty());
        first.flash_error("nope");
        first.flash_success("yay");

        let second = RequestContext::new(session.clone(), None, None);
        assert_eq!(second.notices(), &[Notice::error("nope"), Notice::success("yay")]);

        let third = RequestContext::new(session, None, None);
        assert!(third.notices().is_empty());
    }

    #[actix_web::test]
    async fn referer_from_same_host_is_used() {
        let req = TestRequest::default()
            .insert_header((header::HOST, "blog.test"))
            .insert_header((header::REFERER, "http://blog.test/blogs/abc?x=1"))
            .to_http_request();
        assert_eq!(same_site_referer(&req).as_deref(), Some("/blogs/abc?x=1"));
    }

    #[actix_web::test]
    async fn foreign_referer_is_ignored() {
        let req = TestRequest::default()
            .insert_header((header::HOST, "blog.test"))
            .insert_header((header::REFERER, "http://evil.test/phish"))
            .to_http_request();
        assert_eq!(same_site_referer(&req), None);

        let ctx = RequestContext::new(req.get_session(), None, same_site_referer(&req));
        assert_eq!(ctx.back_or("/blogs"), "/blogs");
    }
}
