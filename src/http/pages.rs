//! Session-gated page views.

use actix_web::http::header;
use actix_web::{get, web, HttpResponse, Responder};
use askama::Template;

use crate::session::{AdminUser, AuthUser, SessionUser};

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate<'a> {
    user: &'a SessionUser,
}

#[derive(Template)]
#[template(path = "form.html")]
struct FormTemplate<'a> {
    user: &'a SessionUser,
}

#[derive(Template)]
#[template(path = "sidebar.html")]
struct SidebarTemplate<'a> {
    user: &'a SessionUser,
}

#[derive(Template)]
#[template(path = "dstd_user.html")]
struct UserDashboardTemplate<'a> {
    user: &'a SessionUser,
}

#[derive(Template)]
#[template(path = "dstd_admin.html")]
struct AdminDashboardTemplate<'a> {
    user: &'a SessionUser,
}

fn render<T: Template>(tpl: T) -> HttpResponse {
    match tpl.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("template render failed: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/home"))
        .finish()
}

#[get("/home")]
pub async fn home(user: AuthUser) -> impl Responder {
    render(HomeTemplate { user: &user.0 })
}

#[get("/form")]
pub async fn form(user: AuthUser) -> impl Responder {
    render(FormTemplate { user: &user.0 })
}

#[get("/sidebar")]
pub async fn sidebar(user: AuthUser) -> impl Responder {
    render(SidebarTemplate { user: &user.0 })
}

#[get("/dstd_user")]
pub async fn user_dashboard(user: AuthUser) -> impl Responder {
    render(UserDashboardTemplate { user: &user.0 })
}

/// Admin-only review dashboard.
#[get("/dstd_admin")]
pub async fn admin_dashboard(admin: AdminUser) -> impl Responder {
    render(AdminDashboardTemplate { user: &admin.0 })
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(home)
        .service(form)
        .service(sidebar)
        .service(user_dashboard)
        .service(admin_dashboard);
}
