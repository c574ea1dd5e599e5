// Prompt template for interview question generation.
// Placeholders: {jd}, {resume}, {years_of_experience}, {difficulty_level}

use crate::questions::models::{Difficulty, ExperienceRange};

pub const QUESTION_PROMPT_TEMPLATE: &str = r#"
Act as an experienced interviewer with deep understanding of the tech field, software engineering, data science, data analysis, and big data engineering. Your task is to generate interview questions and an evaluation matrix based on the given job description, years of experience required, and difficulty level. If a resume is provided, use it to tailor some questions, but if not, focus on the job description.

Job Description: {jd}
Resume: {resume}
Years of Experience: {years_of_experience}
Difficulty Level: {difficulty_level}

Generate a response in the following JSON format:
{
    "general_questions": [
        "Question 1",
        "Question 2",
        ...
    ],
    "technical_questions": [
        "Question 1",
        "Question 2",
        ...
    ],
    "coding_questions": [
        {
            "question": "Question 1",
            "difficulty": "Easy/Medium/Hard"
        },
        {
            "question": "Question 2",
            "difficulty": "Easy/Medium/Hard"
        },
        ...
    ],
    "evaluation_matrix": [
        {
            "skill": "Skill 1 (with years of experience if applicable)",
            "description": "Brief description of the skill"
        },
        {
            "skill": "Skill 2",
            "description": "Brief description of the skill"
        },
        ...
    ]
}

Notes:
1. Generate 5-7 general questions related to the job requirements and candidate's experience (if resume is provided).
2. Generate 5-7 technical questions specific to the technologies mentioned in the job description.
3. If the job description is related to coding, generate 2-3 coding questions. Otherwise, omit the "coding_questions" field.
4. Ensure that the questions are appropriate for the specified years of experience and difficulty level.
5. Identify 5-10 key skills from the job description for the evaluation matrix. Include years of experience if specified in the job description.
"#;

/// Fills the question template. Inputs are inserted verbatim; placeholder-like
/// text inside an input is never expanded.
pub fn compose_prompt(
    job_description: &str,
    resume_text: &str,
    experience_range: ExperienceRange,
    difficulty: Difficulty,
) -> String {
    let years = experience_range.to_string();
    fill_template(
        QUESTION_PROMPT_TEMPLATE,
        &[
            ("jd", job_description),
            ("resume", resume_text),
            ("years_of_experience", &years),
            ("difficulty_level", difficulty.as_str()),
        ],
    )
}

/// Single left-to-right pass over `template`, replacing `{name}` for every
/// known name. Unknown braces (the JSON example) are copied through.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
