use pickleball_server::upload::{RegistrationForm, UploadedFile};
use pickleball_server::validation::{is_valid_phone, validate_submission, SubmissionKind};

fn avatar(content_type: &str, size: u64) -> UploadedFile {
    UploadedFile {
        original_name: "photo.jpg".into(),
        file_name: "1700000000000-123456789.jpg".into(),
        content_type: content_type.into(),
        size,
    }
}

fn valid_create_form() -> RegistrationForm {
    RegistrationForm {
        leader_name: "Tran Van A".into(),
        leader_phone: "0912345678".into(),
        category: "mens_doubles".into(),
        team_id: None,
        full_name: vec!["Nguyen Van B".into(), "Le Thi C".into()],
        nick_name: vec!["Ben".into(), "".into()],
        phone_number: vec!["0912345679".into(), "09123456780".into()],
        gender: vec!["male".into(), "female".into()],
        date_of_birth: vec!["1990-05-12".into(), "".into()],
        files: vec![avatar("image/jpeg", 1024), avatar("image/png", 2048)],
    }
}

#[test]
fn phone_requires_10_or_11_digits() {
    assert!(!is_valid_phone("123"));
    assert!(!is_valid_phone("12345678901234"));
    assert!(is_valid_phone("0912345678"));
    assert!(is_valid_phone("09123456789"));
}

#[test]
fn phone_ignores_embedded_whitespace() {
    assert!(is_valid_phone("091 234 5678"));
    assert!(!is_valid_phone("091-234-5678"));
}

#[test]
fn valid_submission_passes() {
    let errors = validate_submission(&valid_create_form(), SubmissionKind::Create);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[test]
fn violations_are_collected_not_fail_fast() {
    let mut form = valid_create_form();
    form.leader_name = "X".into();
    form.leader_phone = "123".into();
    form.category = "".into();
    let errors = validate_submission(&form, SubmissionKind::Create);
    assert_eq!(errors.len(), 3);
}

#[test]
fn zero_files_rejected_on_create() {
    let mut form = valid_create_form();
    form.files.clear();
    let errors = validate_submission(&form, SubmissionKind::Create);
    assert!(errors.iter().any(|e| e.contains("photo")), "{errors:?}");
}

#[test]
fn short_player_name_names_the_player_index() {
    let mut form = valid_create_form();
    form.full_name[1] = "X".into();
    let errors = validate_submission(&form, SubmissionKind::Create);
    assert!(errors.iter().any(|e| e.starts_with("Player 2:")), "{errors:?}");
}

#[test]
fn player_name_trimmed_before_length_check() {
    let mut form = valid_create_form();
    form.full_name[0] = "  A  ".into();
    let errors = validate_submission(&form, SubmissionKind::Create);
    assert!(errors.iter().any(|e| e.starts_with("Player 1:")), "{errors:?}");
}

#[test]
fn bad_player_phone_names_the_player_index() {
    let mut form = valid_create_form();
    form.phone_number[0] = "12".into();
    let errors = validate_submission(&form, SubmissionKind::Create);
    assert!(
        errors.iter().any(|e| e.starts_with("Player 1:") && e.contains("phone")),
        "{errors:?}"
    );
}

#[test]
fn empty_player_arrays_rejected() {
    let mut form = valid_create_form();
    form.full_name.clear();
    form.phone_number.clear();
    let errors = validate_submission(&form, SubmissionKind::Create);
    assert!(errors.iter().any(|e| e.contains("At least 1 player")), "{errors:?}");
}

#[test]
fn non_image_upload_rejected() {
    let mut form = valid_create_form();
    form.files[0] = avatar("application/pdf", 1024);
    let errors = validate_submission(&form, SubmissionKind::Create);
    assert!(
        errors.iter().any(|e| e.starts_with("Player 1:") && e.contains("image")),
        "{errors:?}"
    );
}

#[test]
fn oversized_upload_rejected() {
    let mut form = valid_create_form();
    form.files[1] = avatar("image/jpeg", 6 * 1024 * 1024);
    let errors = validate_submission(&form, SubmissionKind::Create);
    assert!(
        errors.iter().any(|e| e.starts_with("Player 2:") && e.contains("large")),
        "{errors:?}"
    );
}

#[test]
fn file_at_size_limit_accepted() {
    let mut form = valid_create_form();
    form.files[0] = avatar("image/jpeg", 5 * 1024 * 1024);
    let errors = validate_submission(&form, SubmissionKind::Create);
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn update_allows_zero_files_but_requires_team_id() {
    let mut form = valid_create_form();
    form.files.clear();

    let errors = validate_submission(&form, SubmissionKind::Update);
    assert_eq!(errors, vec!["Missing team ID".to_string()]);

    form.team_id = Some("42".into());
    let errors = validate_submission(&form, SubmissionKind::Update);
    assert!(errors.is_empty(), "{errors:?}");
}

#[test]
fn update_still_checks_supplied_files() {
    let mut form = valid_create_form();
    form.team_id = Some("42".into());
    form.files = vec![avatar("text/plain", 10)];
    let errors = validate_submission(&form, SubmissionKind::Update);
    assert!(errors.iter().any(|e| e.contains("image")), "{errors:?}");
}
