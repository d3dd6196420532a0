//! Submission validation. All checks run and violations are collected into a
//! list of human-readable messages, not fail-fast.

use crate::upload::RegistrationForm;

pub const MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Create,
    /// Requires a team id; uploaded photos become optional.
    Update,
}

/// 10–11 digits, ignoring embedded whitespace.
pub fn is_valid_phone(raw: &str) -> bool {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    (10..=11).contains(&stripped.len()) && stripped.chars().all(|c| c.is_ascii_digit())
}

fn is_valid_name(raw: &str) -> bool {
    raw.trim().chars().count() >= 2
}

pub fn validate_submission(form: &RegistrationForm, kind: SubmissionKind) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_valid_name(&form.leader_name) {
        errors.push("Leader name must have at least 2 characters".to_string());
    }
    if !is_valid_phone(&form.leader_phone) {
        errors.push("Leader phone number must have 10-11 digits".to_string());
    }
    if form.category.trim().is_empty() {
        errors.push("Please choose a category".to_string());
    }
    if kind == SubmissionKind::Update
        && form
            .team_id
            .as_deref()
            .map_or(true, |t| t.trim().is_empty())
    {
        errors.push("Missing team ID".to_string());
    }

    if form.full_name.is_empty() {
        errors.push("At least 1 player is required".to_string());
    } else {
        for (i, name) in form.full_name.iter().enumerate() {
            if !is_valid_name(name) {
                errors.push(format!(
                    "Player {}: full name must have at least 2 characters",
                    i + 1
                ));
            }
        }
    }

    if form.phone_number.is_empty() {
        errors.push("At least 1 player is required".to_string());
    } else {
        for (i, phone) in form.phone_number.iter().enumerate() {
            if !is_valid_phone(phone) {
                errors.push(format!("Player {}: phone number must have 10-11 digits", i + 1));
            }
        }
    }

    if kind == SubmissionKind::Create && form.files.is_empty() {
        errors.push("At least 1 player photo is required".to_string());
    }
    for (i, file) in form.files.iter().enumerate() {
        if !file.content_type.starts_with("image/") {
            errors.push(format!("Player {}: file must be an image", i + 1));
        }
        if file.size > MAX_AVATAR_BYTES {
            errors.push(format!("Player {}: file too large (max 5MB)", i + 1));
        }
    }

    errors
}
