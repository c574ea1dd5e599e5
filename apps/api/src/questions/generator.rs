//! Question generation: the single entry point behind every interface.
//!
//! Flow: validate → extract resume text → compose prompt → LLM generate →
//!       parse reply → render sections.
//!
//! Nothing is stored. Any failure ends the submission; no partial report is
//! ever returned.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::questions::extract::extract_resume_text_blocking;
use crate::questions::models::{
    require_description, Difficulty, ExperienceRange, JobRequest, QuestionSet,
};
use crate::questions::prompts::compose_prompt;
use crate::questions::render::{parse_reply, render, RenderedReport};

/// Raw submission as collected from a form or any other caller.
#[derive(Debug, Clone)]
pub struct QuestionInput {
    pub job_description: String,
    /// PDF bytes of the candidate's resume, if one was uploaded.
    pub resume: Option<Bytes>,
    pub experience_range: ExperienceRange,
    pub difficulty: Difficulty,
}

/// Successful outcome of one submission.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedQuestions {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub question_set: QuestionSet,
    pub report: RenderedReport,
    pub markdown: String,
}

/// Runs the full pipeline for one submission.
///
/// Steps:
/// 1. Reject a blank job description (nothing else runs).
/// 2. Extract resume text, or use the fallback when no document was given.
/// 3. compose_prompt() → prompt
/// 4. generator.generate() → raw reply (one call, no retry)
/// 5. parse_reply() → QuestionSet, render() → RenderedReport
pub async fn generate_questions(
    input: QuestionInput,
    generator: &dyn TextGenerator,
) -> Result<GeneratedQuestions, AppError> {
    let request_id = Uuid::new_v4();

    // Step 1: Validate before touching the document or the network
    require_description(&input.job_description)?;

    // Step 2: Resume text
    let has_resume = input.resume.is_some();
    let resume_text = extract_resume_text_blocking(input.resume).await?;
    if has_resume && resume_text.trim().is_empty() {
        warn!("Request {request_id}: resume contained no extractable text");
    }

    let request = JobRequest::new(
        input.job_description,
        resume_text,
        input.experience_range,
        input.difficulty,
    );

    // Step 3: Prompt
    let prompt = compose_prompt(
        &request.description,
        &request.resume_text,
        request.experience_range,
        request.difficulty,
    );
    info!(
        "Request {request_id}: generating {} questions for {}-{} years (resume: {})",
        request.difficulty,
        request.experience_range.min(),
        request.experience_range.max(),
        if has_resume { "uploaded" } else { "none" }
    );

    // Step 4: Model call
    let reply = generator.generate(&prompt).await?;

    // Step 5: Parse and render; a bad reply is discarded whole
    let question_set = parse_reply(&reply)?;
    let report = render(&question_set);
    let markdown = report.to_markdown();

    info!(
        "Request {request_id}: rendered {} general, {} technical, {} coding questions and {} skills",
        question_set.general_questions.len(),
        question_set.technical_questions.len(),
        question_set.coding_questions.as_ref().map_or(0, Vec::len),
        question_set.evaluation_matrix.len()
    );

    Ok(GeneratedQuestions {
        request_id,
        generated_at: Utc::now(),
        question_set,
        report,
        markdown,
    })
}
