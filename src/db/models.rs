use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// bcrypt hash.
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Player fields of one submission entry, paired positionally with an
/// uploaded avatar (if any).
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub full_name: String,
    pub nick_name: Option<String>,
    pub phone_number: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar_path: Option<String>,
}

/// One flat row of the registration ⟕ players join driving the read APIs.
/// Player columns are nullable because a registration may have no players.
#[derive(Debug, FromRow)]
pub struct RegistrationPlayerRow {
    pub registration_id: i64,
    pub event_id: i32,
    pub leader_name: String,
    pub leader_phone: String,
    pub user_id: i64,
    pub user_username: Option<String>,
    pub player_id: Option<i64>,
    pub category: Option<String>,
    pub full_name: Option<String>,
    pub nick_name: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerEntry {
    pub id: i64,
    pub category: String,
    pub full_name: String,
    pub nick_name: Option<String>,
    pub phone_number: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar_path: Option<String>,
}

/// One registration with its ordered players, as returned by the read APIs.
/// Owner fields are present only in the admin-scoped variant.
#[derive(Debug, Serialize)]
pub struct RegistrationGroup {
    pub registration_id: i64,
    pub event_id: i32,
    pub leader_name: String,
    pub leader_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_username: Option<String>,
    pub players: Vec<PlayerEntry>,
}
