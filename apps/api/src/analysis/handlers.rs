//! Axum route handler for résumé uploads.

use std::io::Write;

use anyhow::{anyhow, Context};
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{info, warn};

use crate::analysis::report::{save_report, SessionReport};
use crate::analysis::{analyze_resume, SkillGapReport};
use crate::errors::AppError;
use crate::state::AppState;

/// Fields collected from the multipart form.
#[derive(Default)]
struct UploadForm {
    file_name: Option<String>,
    file: Option<Bytes>,
    role: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                form.file_name = field.file_name().map(String::from);
                form.file = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?,
                );
            }
            Some("role") => {
                form.role = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read role: {e}")))?,
                );
            }
            _ => {}
        }
    }
    Ok(form)
}

/// POST /upload_resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SkillGapReport>, AppError> {
    let form = read_form(multipart).await?;
    let (Some(file), Some(input_role)) = (form.file, form.role) else {
        return Err(AppError::Validation("Missing file or role".to_string()));
    };

    let Some(role) = state.catalog.resolve(&input_role) else {
        warn!(
            role = %input_role.trim(),
            available = ?state.catalog.role_names(),
            "Invalid role"
        );
        return Err(AppError::InvalidRole(input_role.trim().to_string()));
    };

    let file_name = form.file_name.unwrap_or_default();
    if !file_name.to_lowercase().ends_with(".pdf") {
        return Err(AppError::UnsupportedFile(file_name));
    }

    info!(role = %role.name, file = %file_name, bytes = file.len(), "Analyzing résumé");

    let role = role.clone();
    let upload_dir = state.config.upload_dir.clone();
    let analysis = tokio::task::spawn_blocking(move || -> Result<SkillGapReport, AppError> {
        // The staged file is removed when `staged` drops, on every path.
        let mut builder = tempfile::Builder::new();
        builder.prefix("resume-").suffix(".pdf");
        let mut staged = match &upload_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .context("Failed to stage upload")?;
        staged.write_all(&file).context("Failed to stage upload")?;
        staged.flush().context("Failed to stage upload")?;

        Ok(analyze_resume(staged.path(), &role)?)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow!("Extraction task failed: {e}")))??;

    let report = SessionReport::from_analysis(&analysis);
    if let Err(e) = save_report(&state.config.report_dir, &report) {
        warn!("Failed to save session report: {e:#}");
    }

    Ok(Json(analysis))
}
