//! Team registration submission (create / update) and the grouped read APIs.

use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use crate::db::models::NewPlayer;
use crate::db::registration_repo;
use crate::session::{AdminUser, AuthUser};
use crate::upload::{self, RegistrationForm};
use crate::validation::{validate_submission, SubmissionKind};

//////////////////////////////////////////////////
// Requests
//////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}

impl CategoryParams {
    /// `all`, empty, or absent means no filtering.
    fn filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != "all")
    }
}

//////////////////////////////////////////////////
// Helpers
//////////////////////////////////////////////////

/// Player rows built from the parallel form arrays; entry `i` pairs with
/// uploaded file `i`, or a null avatar when no file was supplied there.
fn build_players(form: &RegistrationForm) -> Vec<NewPlayer> {
    form.full_name
        .iter()
        .enumerate()
        .map(|(i, name)| NewPlayer {
            full_name: name.clone(),
            nick_name: form
                .nick_name
                .get(i)
                .filter(|s| !s.trim().is_empty())
                .cloned(),
            phone_number: form.phone_number.get(i).cloned().unwrap_or_default(),
            gender: form.gender.get(i).filter(|s| !s.trim().is_empty()).cloned(),
            date_of_birth: form
                .date_of_birth
                .get(i)
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
            avatar_path: form.files.get(i).map(|f| f.file_name.clone()),
        })
        .collect()
}

fn intake_error(e: anyhow::Error) -> HttpResponse {
    log::error!("multipart intake failed: {e:?}");
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "message": "Something went wrong"
    }))
}

fn validation_error(errors: Vec<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "success": false,
        "message": "Validation failed",
        "errors": errors
    }))
}

/// Write-path database failures echo the underlying error chain.
fn db_error(e: anyhow::Error) -> HttpResponse {
    log::error!("database error: {e:?}");
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "message": format!("Database error: {e:#}")
    }))
}

//////////////////////////////////////////////////
// POST /api/add-player
//////////////////////////////////////////////////

#[post("/add-player")]
pub async fn add_player(
    user: AuthUser,
    db: web::Data<PgPool>,
    payload: Multipart,
) -> impl Responder {
    let form = match upload::parse_registration_form(payload).await {
        Ok(f) => f,
        Err(e) => return intake_error(e),
    };

    let errors = validate_submission(&form, SubmissionKind::Create);
    if !errors.is_empty() {
        return validation_error(errors);
    }

    let registration_id = match registration_repo::create_registration(
        db.get_ref(),
        &form.leader_name,
        &form.leader_phone,
        user.0.id,
    )
    .await
    {
        Ok(id) => id,
        Err(e) => return db_error(e),
    };

    let players = build_players(&form);
    match registration_repo::insert_players(db.get_ref(), registration_id, &form.category, &players)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Players added",
            "registration_id": registration_id
        })),
        // The registration row remains; creation is not transactional.
        Err(e) => db_error(e),
    }
}

//////////////////////////////////////////////////
// POST /api/update-player
//////////////////////////////////////////////////

#[post("/update-player")]
pub async fn update_player(
    user: AuthUser,
    db: web::Data<PgPool>,
    payload: Multipart,
) -> impl Responder {
    let form = match upload::parse_registration_form(payload).await {
        Ok(f) => f,
        Err(e) => return intake_error(e),
    };

    let errors = validate_submission(&form, SubmissionKind::Update);
    if !errors.is_empty() {
        return validation_error(errors);
    }

    let not_found = || {
        HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "No registration found to update"
        }))
    };

    // Validation guarantees the field is present; a non-numeric id cannot
    // match a row, so it reads as not-found.
    let team_id: i64 = match form
        .team_id
        .as_deref()
        .and_then(|t| t.trim().parse().ok())
    {
        Some(id) => id,
        None => return not_found(),
    };

    let owner = if user.0.is_admin() {
        None
    } else {
        Some(user.0.id)
    };

    let players = build_players(&form);
    match registration_repo::replace_registration(
        db.get_ref(),
        team_id,
        &form.leader_name,
        &form.leader_phone,
        owner,
        &form.category,
        &players,
    )
    .await
    {
        Ok(true) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Players updated",
            "registration_id": team_id
        })),
        Ok(false) => not_found(),
        Err(e) => db_error(e),
    }
}

//////////////////////////////////////////////////
// GET /api/tournament-data
//////////////////////////////////////////////////

#[get("/tournament-data")]
pub async fn tournament_data(
    user: AuthUser,
    params: web::Query<CategoryParams>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match registration_repo::fetch_user_rows(db.get_ref(), user.0.id, params.filter()).await {
        Ok(rows) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": registration_repo::group_rows(rows, false)
        })),
        Err(e) => {
            log::error!("tournament-data query failed: {e:?}");
            HttpResponse::InternalServerError()
                .json(json!({ "success": false, "message": "Database error" }))
        }
    }
}

//////////////////////////////////////////////////
// GET /api/admin-tournament-data
//////////////////////////////////////////////////

#[get("/admin-tournament-data")]
pub async fn admin_tournament_data(
    _admin: AdminUser,
    params: web::Query<CategoryParams>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match registration_repo::fetch_all_rows(db.get_ref(), params.filter()).await {
        Ok(rows) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": registration_repo::group_rows(rows, true)
        })),
        Err(e) => {
            log::error!("admin-tournament-data query failed: {e:?}");
            HttpResponse::InternalServerError()
                .json(json!({ "success": false, "message": "Database error" }))
        }
    }
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(add_player)
        .service(update_player)
        .service(tournament_data)
        .service(admin_tournament_data);
}
