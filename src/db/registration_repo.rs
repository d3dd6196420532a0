//! Registration and player persistence, plus the grouping of the flat
//! read-side join into nested registration → players structures.

use std::collections::HashMap;

use anyhow::{Context, Result};
use futures::future::try_join_all;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::db::models::{NewPlayer, PlayerEntry, RegistrationGroup, RegistrationPlayerRow};

const PLAYER_INSERT: &str = r#"
    INSERT INTO players
        (registration_id, category, full_name, nick_name,
         phone_number, gender, date_of_birth, avatar_path)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
"#;

/// Insert the registration row for a new submission, returning its id.
pub async fn create_registration(
    db: &PgPool,
    leader_name: &str,
    leader_phone: &str,
    user_id: i64,
) -> Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"INSERT INTO registration (event_id, leader_name, leader_phone, user_id)
           VALUES (1, $1, $2, $3)
           RETURNING registration_id"#,
    )
    .bind(leader_name)
    .bind(leader_phone)
    .bind(user_id)
    .fetch_one(db)
    .await
    .context("creating registration")
}

/// Insert one player row per entry, issued as a concurrent batch and joined.
/// Each statement targets a distinct row so ordering among them is not
/// significant. A single failure fails the batch; the registration row is
/// left in place.
pub async fn insert_players(
    db: &PgPool,
    registration_id: i64,
    category: &str,
    players: &[NewPlayer],
) -> Result<()> {
    let inserts = players.iter().map(|p| {
        sqlx::query(PLAYER_INSERT)
            .bind(registration_id)
            .bind(category)
            .bind(&p.full_name)
            .bind(&p.nick_name)
            .bind(&p.phone_number)
            .bind(&p.gender)
            .bind(p.date_of_birth)
            .bind(&p.avatar_path)
            .execute(db)
    });
    try_join_all(inserts).await.context("inserting players")?;
    Ok(())
}

/// Update a registration's leader fields and replace its players wholesale,
/// inside one transaction. `owner` scopes the update for non-admin callers;
/// `None` (admin) matches any registration. Returns `false` when no row
/// matched, which covers both "not found" and "not owned".
pub async fn replace_registration(
    db: &PgPool,
    registration_id: i64,
    leader_name: &str,
    leader_phone: &str,
    owner: Option<i64>,
    category: &str,
    players: &[NewPlayer],
) -> Result<bool> {
    let mut tx = db.begin().await.context("opening transaction")?;

    let update = match owner {
        Some(user_id) => sqlx::query(
            r#"UPDATE registration SET leader_name = $1, leader_phone = $2
               WHERE registration_id = $3 AND user_id = $4"#,
        )
        .bind(leader_name)
        .bind(leader_phone)
        .bind(registration_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await,
        None => sqlx::query(
            r#"UPDATE registration SET leader_name = $1, leader_phone = $2
               WHERE registration_id = $3"#,
        )
        .bind(leader_name)
        .bind(leader_phone)
        .bind(registration_id)
        .execute(&mut *tx)
        .await,
    };

    if update.context("updating registration")?.rows_affected() == 0 {
        return Ok(false);
    }

    sqlx::query("DELETE FROM players WHERE registration_id = $1")
        .bind(registration_id)
        .execute(&mut *tx)
        .await
        .context("deleting existing players")?;

    for p in players {
        sqlx::query(PLAYER_INSERT)
            .bind(registration_id)
            .bind(category)
            .bind(&p.full_name)
            .bind(&p.nick_name)
            .bind(&p.phone_number)
            .bind(&p.gender)
            .bind(p.date_of_birth)
            .bind(&p.avatar_path)
            .execute(&mut *tx)
            .await
            .context("inserting replacement player")?;
    }

    tx.commit().await.context("committing update")?;
    Ok(true)
}

/// Flat rows for the caller's own registrations, optionally category-filtered.
pub async fn fetch_user_rows(
    db: &PgPool,
    user_id: i64,
    category: Option<&str>,
) -> Result<Vec<RegistrationPlayerRow>> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
        r#"SELECT r.registration_id, r.event_id, r.leader_name, r.leader_phone, r.user_id,
                  NULL::TEXT AS user_username,
                  p.id AS player_id, p.category, p.full_name, p.nick_name,
                  p.phone_number, p.gender, p.date_of_birth, p.avatar_path
             FROM registration r
             LEFT JOIN players p ON r.registration_id = p.registration_id
            WHERE r.user_id = "#,
    );
    query.push_bind(user_id);
    if let Some(cat) = category {
        query.push(" AND p.category = ");
        query.push_bind(cat);
    }
    query.push(" ORDER BY r.registration_id, p.id");

    query
        .build_query_as::<RegistrationPlayerRow>()
        .fetch_all(db)
        .await
        .context("querying user registrations")
}

/// Flat rows across every user, with the owner's username joined in.
pub async fn fetch_all_rows(
    db: &PgPool,
    category: Option<&str>,
) -> Result<Vec<RegistrationPlayerRow>> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
        r#"SELECT r.registration_id, r.event_id, r.leader_name, r.leader_phone, r.user_id,
                  u.username AS user_username,
                  p.id AS player_id, p.category, p.full_name, p.nick_name,
                  p.phone_number, p.gender, p.date_of_birth, p.avatar_path
             FROM registration r
             LEFT JOIN users u ON r.user_id = u.id
             LEFT JOIN players p ON r.registration_id = p.registration_id"#,
    );
    if let Some(cat) = category {
        query.push(" WHERE p.category = ");
        query.push_bind(cat);
    }
    query.push(" ORDER BY r.registration_id, p.id");

    query
        .build_query_as::<RegistrationPlayerRow>()
        .fetch_all(db)
        .await
        .context("querying all registrations")
}

/// Collapse the ordered flat join into one entry per registration, preserving
/// first-seen registration order. Rows with no player (left-join null)
/// contribute an entry with an empty player list.
pub fn group_rows(rows: Vec<RegistrationPlayerRow>, include_owner: bool) -> Vec<RegistrationGroup> {
    let mut groups: Vec<RegistrationGroup> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let at = *index.entry(row.registration_id).or_insert_with(|| {
            groups.push(RegistrationGroup {
                registration_id: row.registration_id,
                event_id: row.event_id,
                leader_name: row.leader_name.clone(),
                leader_phone: row.leader_phone.clone(),
                user_id: if include_owner { Some(row.user_id) } else { None },
                user_username: if include_owner {
                    row.user_username.clone()
                } else {
                    None
                },
                players: Vec::new(),
            });
            groups.len() - 1
        });

        if let Some(player_id) = row.player_id {
            groups[at].players.push(PlayerEntry {
                id: player_id,
                category: row.category.unwrap_or_default(),
                full_name: row.full_name.unwrap_or_default(),
                nick_name: row.nick_name,
                phone_number: row.phone_number.unwrap_or_default(),
                gender: row.gender,
                date_of_birth: row.date_of_birth,
                avatar_path: row.avatar_path,
            });
        }
    }

    groups
}
