//! Runtime configuration for the registration portal.

use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Settings {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    /// HTTP listen port.
    pub port: u16,
    /// Marks the session cookie `Secure` when set.
    pub production: bool,
    /// Directory uploaded avatars are written to.
    pub upload_dir: String,
}

impl Settings {
    fn from_env() -> Self {
        let db_host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".into());
        let db_port = env::var("DB_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5432);
        let db_user = env::var("DB_USER").unwrap_or_else(|_| "postgres".into());
        let db_password = env::var("DB_PASSWORD").unwrap_or_else(|_| "admin".into());
        let db_name = env::var("DB_NAME").unwrap_or_else(|_| "pickleball".into());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);

        let production = env::var("PRODUCTION")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "public/uploads".into());

        Settings {
            db_host,
            db_port,
            db_user,
            db_password,
            db_name,
            port,
            production,
            upload_dir,
        }
    }

    /// Connection string for the pool. A full `DATABASE_URL` wins when present.
    pub fn database_url(&self) -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
            )
        })
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}
