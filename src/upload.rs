//! Multipart intake for registration submissions.
//!
//! Avatar files are written to disk chunk-by-chunk as they stream in, before
//! any validation runs; a submission that later fails validation or hits a
//! database error leaves its files behind.

use std::path::Path;

use actix_multipart::{Field, Multipart};
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use futures_util::StreamExt;
use rand::Rng;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::config::settings;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    /// Stored name, relative to the upload directory.
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
}

/// A registration submission as it arrives on the wire: scalar leader fields
/// plus parallel per-player arrays, aligned positionally with the uploads.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub leader_name: String,
    pub leader_phone: String,
    pub category: String,
    pub team_id: Option<String>,
    pub full_name: Vec<String>,
    pub nick_name: Vec<String>,
    pub phone_number: Vec<String>,
    pub gender: Vec<String>,
    pub date_of_birth: Vec<String>,
    pub files: Vec<UploadedFile>,
}

/// `<millis>-<random>.<ext>`, keeping the original extension.
pub fn unique_file_name(original: &str) -> String {
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    format!("{}-{}{}", Utc::now().timestamp_millis(), suffix, ext)
}

/// Drain the multipart stream into a [`RegistrationForm`]. Field names may
/// carry a trailing `[]` (array syntax); repeated names accumulate in order.
/// Only `avatar` fields are treated as uploads, everything else as text.
pub async fn parse_registration_form(mut payload: Multipart) -> Result<RegistrationForm> {
    let mut form = RegistrationForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| anyhow!("reading multipart field: {e}"))?;

        let (name, filename) = {
            let cd = field.content_disposition();
            let raw = cd.get_name().unwrap_or_default();
            let name = raw.strip_suffix("[]").unwrap_or(raw).to_string();
            (name, cd.get_filename().map(str::to_string))
        };

        match filename {
            Some(original) if name == "avatar" => {
                let stored = store_file(&mut field, &original).await?;
                form.files.push(stored);
            }
            Some(_) => drain(&mut field).await?,
            None => {
                let value = read_text(&mut field).await?;
                match name.as_str() {
                    "fullname" => form.leader_name = value,
                    "phone" => form.leader_phone = value,
                    "category" => form.category = value,
                    "teamId" => form.team_id = Some(value),
                    "full_name" => form.full_name.push(value),
                    "nick_name" => form.nick_name.push(value),
                    "phone_number" => form.phone_number.push(value),
                    "gender" => form.gender.push(value),
                    "date_of_birth" => form.date_of_birth.push(value),
                    _ => {}
                }
            }
        }
    }

    Ok(form)
}

async fn store_file(field: &mut Field, original: &str) -> Result<UploadedFile> {
    let content_type = field
        .content_type()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let file_name = unique_file_name(original);
    let path = Path::new(&settings().upload_dir).join(&file_name);
    let mut out = fs::File::create(&path)
        .await
        .with_context(|| format!("creating {}", path.display()))?;

    let mut size: u64 = 0;
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| anyhow!("reading upload chunk: {e}"))?;
        size += chunk.len() as u64;
        out.write_all(&chunk).await.context("writing upload chunk")?;
    }
    out.flush().await.context("flushing upload")?;

    Ok(UploadedFile {
        original_name: original.to_string(),
        file_name,
        content_type,
        size,
    })
}

async fn read_text(field: &mut Field) -> Result<String> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| anyhow!("reading form field: {e}"))?;
        buf.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

async fn drain(field: &mut Field) -> Result<()> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|e| anyhow!("discarding field: {e}"))?;
    }
    Ok(())
}
