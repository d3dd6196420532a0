//! Form-based login / account registration / logout.

use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use askama::Template;
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::user_repo;
use crate::session::{
    clear_session_cookie, session_cookie, SessionStore, SessionUser, SESSION_COOKIE,
};

//////////////////////////////////////////////////
// Templates & requests
//////////////////////////////////////////////////

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate<'a> {
    error: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate<'a> {
    error: Option<&'a str>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

fn render_login(error: Option<&str>) -> HttpResponse {
    match (LoginTemplate { error }).render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("login template render failed: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn render_register(error: Option<&str>) -> HttpResponse {
    match (RegisterTemplate { error }).render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("register template render failed: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

//////////////////////////////////////////////////
// GET /login · POST /login
//////////////////////////////////////////////////

#[get("/login")]
pub async fn login_page() -> impl Responder {
    render_login(None)
}

#[post("/login")]
pub async fn login(
    form: web::Form<LoginForm>,
    db: web::Data<PgPool>,
    sessions: web::Data<SessionStore>,
) -> impl Responder {
    let user = match user_repo::find_by_username(db.get_ref(), form.username.trim()).await {
        Ok(Some(u)) => u,
        Ok(None) => return render_login(Some("Invalid username or password")),
        Err(e) => {
            log::error!("login lookup failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match bcrypt::verify(&form.password, &user.password) {
        Ok(true) => {}
        _ => return render_login(Some("Invalid username or password")),
    }

    let sid = sessions.create(SessionUser {
        id: user.id,
        username: user.username,
        role: user.role,
    });

    HttpResponse::Found()
        .cookie(session_cookie(sid))
        .insert_header((header::LOCATION, "/home"))
        .finish()
}

//////////////////////////////////////////////////
// GET /register · POST /register
//////////////////////////////////////////////////

#[get("/register")]
pub async fn register_page() -> impl Responder {
    render_register(None)
}

#[post("/register")]
pub async fn register(form: web::Form<RegisterForm>, db: web::Data<PgPool>) -> impl Responder {
    let username = form.username.trim();
    if username.chars().count() < 3 {
        return render_register(Some("Username must have at least 3 characters"));
    }
    if form.password.chars().count() < 6 {
        return render_register(Some("Password must have at least 6 characters"));
    }
    if form.password != form.confirm_password {
        return render_register(Some("Passwords do not match"));
    }

    let hash = match bcrypt::hash(&form.password, bcrypt::DEFAULT_COST) {
        Ok(h) => h,
        Err(e) => {
            log::error!("password hashing failed: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match user_repo::create_user(db.get_ref(), username, &hash).await {
        Ok(Some(_)) => HttpResponse::Found()
            .insert_header((header::LOCATION, "/login"))
            .finish(),
        Ok(None) => render_register(Some("Username already taken")),
        Err(e) => {
            log::error!("account creation failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

//////////////////////////////////////////////////
// GET /logout
//////////////////////////////////////////////////

#[get("/logout")]
pub async fn logout(req: HttpRequest, sessions: web::Data<SessionStore>) -> impl Responder {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        sessions.remove(cookie.value());
    }
    HttpResponse::Found()
        .cookie(clear_session_cookie())
        .insert_header((header::LOCATION, "/login"))
        .finish()
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login_page)
        .service(login)
        .service(register_page)
        .service(register)
        .service(logout);
}
