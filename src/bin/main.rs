use actix_web::{middleware::Logger, web, App, HttpServer};
use pickleball_server::config::settings;
use pickleball_server::http;
use pickleball_server::session::SessionStore;
use sqlx::postgres::PgPoolOptions;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let settings = settings();

    // Uploads are streamed straight into this directory.
    std::fs::create_dir_all(&settings.upload_dir)?;

    // Postgres pool
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url())
        .await
        .expect("Failed to create Postgres pool");
    log::info!("connected to database {}", settings.db_name);

    // Server-side session map, shared across workers
    let sessions = web::Data::new(SessionStore::new());

    log::info!("server running on http://0.0.0.0:{}", settings.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(sessions.clone())
            .configure(http::routes::init_routes)
    })
    .bind(("0.0.0.0", settings.port))?
    .run()
    .await
}
