use actix_files::Files;
use actix_web::web;

use crate::config::settings;
use crate::http;

/// Mount every HTTP sub-module: the `/api` scope, the page views, the
/// delegated auth and tournament groups, and the stored-avatar static mount.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(http::registrations::init_routes)
            .configure(http::health::init_routes),
    )
    .configure(http::pages::init_routes)
    .configure(http::auth::init_routes)
    .configure(http::tournament::init_routes)
    .service(Files::new("/uploads", &settings().upload_dir));
}
