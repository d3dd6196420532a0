//! Tournament pages route group, mounted under `/tournament`.

use actix_web::{get, web, HttpResponse, Responder};
use askama::Template;

use crate::session::{AuthUser, SessionUser};

#[derive(Template)]
#[template(path = "tournament.html")]
struct TournamentTemplate<'a> {
    user: &'a SessionUser,
}

#[get("")]
pub async fn index(user: AuthUser) -> impl Responder {
    match (TournamentTemplate { user: &user.0 }).render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("tournament template render failed: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/tournament").service(index));
}
