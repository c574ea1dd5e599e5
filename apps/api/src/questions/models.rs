//! Request and reply types for question generation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Resume text used when no document is uploaded.
pub const NO_RESUME_FALLBACK: &str = "No resume provided.";

/// Upper bound of the experience range, in years.
pub const MAX_EXPERIENCE_YEARS: u8 = 15;

/// Requested question difficulty. Also used to tag coding questions in replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    #[serde(alias = "easy", alias = "EASY")]
    Easy,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "hard", alias = "HARD")]
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(AppError::Validation(format!(
                "difficulty must be one of Easy, Medium, Hard (got '{other}')"
            ))),
        }
    }
}

/// Required years of experience, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceRange {
    min: u8,
    max: u8,
}

impl ExperienceRange {
    /// Checks `min <= max <= 15`.
    pub fn new(min: u8, max: u8) -> Result<Self, AppError> {
        if min > max {
            return Err(AppError::Validation(format!(
                "experience range minimum ({min}) exceeds maximum ({max})"
            )));
        }
        if max > MAX_EXPERIENCE_YEARS {
            return Err(AppError::Validation(format!(
                "experience range must stay within 0-{MAX_EXPERIENCE_YEARS} years (got {max})"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }
}

impl Default for ExperienceRange {
    fn default() -> Self {
        Self { min: 1, max: 5 }
    }
}

impl fmt::Display for ExperienceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} years", self.min, self.max)
    }
}

/// One validated submission. Built per request, dropped after rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub description: String,
    pub resume_text: String,
    pub experience_range: ExperienceRange,
    pub difficulty: Difficulty,
}

impl JobRequest {
    /// The description must already have passed [`require_description`];
    /// the pipeline checks it before any document is read.
    pub fn new(
        description: String,
        resume_text: String,
        experience_range: ExperienceRange,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            description,
            resume_text,
            experience_range,
            difficulty,
        }
    }
}

/// Fails with a validation error when the job description is blank.
pub fn require_description(description: &str) -> Result<(), AppError> {
    if description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide a job description.".to_string(),
        ));
    }
    Ok(())
}

/// A coding exercise suggested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingQuestion {
    pub question: String,
    pub difficulty: Difficulty,
}

/// One skill row of the evaluation matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub skill: String,
    pub description: String,
}

/// Parsed model reply. Every field except `coding_questions` must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub general_questions: Vec<String>,
    pub technical_questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coding_questions: Option<Vec<CodingQuestion>>,
    pub evaluation_matrix: Vec<SkillEntry>,
}
