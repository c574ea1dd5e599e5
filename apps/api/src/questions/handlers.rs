//! Axum route handlers for the Questions API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::questions::generator::{generate_questions, GeneratedQuestions, QuestionInput};
use crate::questions::models::{Difficulty, ExperienceRange, MAX_EXPERIENCE_YEARS};
use crate::state::AppState;

/// Upload limit for the whole form, resume included.
pub const MAX_FORM_BYTES: usize = 10 * 1024 * 1024;

/// POST /api/v1/questions
///
/// multipart/form-data fields:
/// - `job_description` (required)
/// - `resume` (optional PDF file; an empty file part counts as absent)
/// - `min_years`, `max_years` (optional, 0-15, default 1-5)
/// - `difficulty` (optional Easy/Medium/Hard, default Easy)
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GeneratedQuestions>, AppError> {
    let input = read_question_form(multipart).await?;
    let output = generate_questions(input, state.generator.as_ref()).await?;
    Ok(Json(output))
}

async fn read_question_form(mut multipart: Multipart) -> Result<QuestionInput, AppError> {
    let mut job_description = String::new();
    let mut resume: Option<Bytes> = None;
    let mut min_years: Option<u8> = None;
    let mut max_years: Option<u8> = None;
    let mut difficulty = Difficulty::default();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => job_description = field.text().await.map_err(form_error)?,
            "resume" => {
                let is_pdf = is_pdf_upload(field.file_name(), field.content_type());
                let data = field.bytes().await.map_err(form_error)?;
                if data.is_empty() {
                    continue;
                }
                if !is_pdf {
                    return Err(AppError::Validation(
                        "resume must be a PDF document".to_string(),
                    ));
                }
                resume = Some(data);
            }
            "min_years" => {
                min_years = parse_years("min_years", &field.text().await.map_err(form_error)?)?
            }
            "max_years" => {
                max_years = parse_years("max_years", &field.text().await.map_err(form_error)?)?
            }
            "difficulty" => {
                let value = field.text().await.map_err(form_error)?;
                if !value.trim().is_empty() {
                    difficulty = value.parse()?;
                }
            }
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    let default_range = ExperienceRange::default();
    let experience_range = ExperienceRange::new(
        min_years.unwrap_or(default_range.min()),
        max_years.unwrap_or(default_range.max()),
    )?;

    Ok(QuestionInput {
        job_description,
        resume,
        experience_range,
        difficulty,
    })
}

fn form_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(e.body_text());
    }
    AppError::Validation(format!("Invalid form data: {e}"))
}

/// Blank means "use the default".
fn parse_years(field: &str, value: &str) -> Result<Option<u8>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse::<u8>().map(Some).map_err(|_| {
        AppError::Validation(format!(
            "{field} must be a whole number between 0 and {MAX_EXPERIENCE_YEARS}"
        ))
    })
}

fn is_pdf_upload(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    let by_type = content_type.is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"));
    let by_name = file_name.is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"));
    by_type || by_name
}
