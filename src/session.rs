//! In-process session store and the request extractors gating routes on it.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::dev::Payload;
use actix_web::error::ErrorForbidden;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use chrono::{DateTime, Duration, Utc};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::config::settings;

pub const SESSION_COOKIE: &str = "sid";
/// Role marker for tournament-committee administrators.
pub const ADMIN_ROLE: &str = "BTC";

const SESSION_TTL_HOURS: i64 = 24;

/// The authenticated identity carried by a session.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

struct SessionEntry {
    user: SessionUser,
    expires_at: DateTime<Utc>,
}

/// Server-side session map keyed by opaque random ids. Entries expire after
/// a fixed 24 h and are swept on every create.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new session for `user`, returning the cookie value.
    pub fn create(&self, user: SessionUser) -> String {
        self.create_with_ttl(user, Duration::hours(SESSION_TTL_HOURS))
    }

    pub fn create_with_ttl(&self, user: SessionUser, ttl: Duration) -> String {
        self.purge_expired();
        let sid = Uuid::new_v4().to_string();
        let entry = SessionEntry {
            user,
            expires_at: Utc::now() + ttl,
        };
        self.sessions
            .write()
            .expect("session store poisoned")
            .insert(sid.clone(), entry);
        sid
    }

    /// Resolve a session id; expired entries are dropped and read as absent.
    pub fn get(&self, sid: &str) -> Option<SessionUser> {
        {
            let sessions = self.sessions.read().expect("session store poisoned");
            match sessions.get(sid) {
                Some(entry) if entry.expires_at > Utc::now() => {
                    return Some(entry.user.clone())
                }
                Some(_) => {}
                None => return None,
            }
        }
        // Entry exists but is stale: evict it.
        self.remove(sid);
        None
    }

    pub fn remove(&self, sid: &str) {
        self.sessions
            .write()
            .expect("session store poisoned")
            .remove(sid);
    }

    pub fn purge_expired(&self) {
        let now = Utc::now();
        self.sessions
            .write()
            .expect("session store poisoned")
            .retain(|_, entry| entry.expires_at > now);
    }
}

/// Session cookie for a freshly issued id.
pub fn session_cookie(sid: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, sid)
        .path("/")
        .http_only(true)
        .secure(settings().production)
        .max_age(CookieDuration::hours(SESSION_TTL_HOURS))
        .finish()
}

/// Expired cookie used to clear the browser state on logout.
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}

//////////////////////////////////////////////////
// ───────────  request extractors  ────────────
//////////////////////////////////////////////////

/// Missing/expired session: send the client back to the login page.
#[derive(Debug)]
pub struct AuthRedirect;

impl fmt::Display for AuthRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not authenticated")
    }
}

impl ResponseError for AuthRedirect {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, "/login"))
            .finish()
    }
}

fn resolve_session(req: &HttpRequest) -> Option<SessionUser> {
    let cookie = req.cookie(SESSION_COOKIE)?;
    let store = req.app_data::<web::Data<SessionStore>>()?;
    store.get(cookie.value())
}

/// Extracts the session user, redirecting to `/login` when there is none.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionUser);

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
        ready(
            resolve_session(req)
                .map(AuthUser)
                .ok_or_else(|| AuthRedirect.into()),
        )
    }
}

/// Like [`AuthUser`] but additionally requires the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub SessionUser);

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
        let res = match resolve_session(req) {
            None => Err(AuthRedirect.into()),
            Some(user) if user.is_admin() => Ok(AdminUser(user)),
            Some(_) => Err(ErrorForbidden("Access denied")),
        };
        ready(res)
    }
}
