//! Reply parsing and display projection.
//!
//! `parse_reply` validates the whole reply against the `QuestionSet` schema
//! before anything is rendered; a reply that fails is discarded entirely.

use serde::Serialize;
use serde_json::error::Category;
use thiserror::Error;

use crate::llm_client::strip_json_fences;
use crate::questions::models::QuestionSet;

pub const GENERAL_TITLE: &str = "General Questions";
pub const TECHNICAL_TITLE: &str = "Technical Questions";
pub const CODING_TITLE: &str = "Coding Questions";
pub const MATRIX_TITLE: &str = "Evaluation Matrix";
pub const MATRIX_COLUMNS: [&str; 3] = ["Skill", "Rating (1-10)", "Comments"];
pub const MATRIX_NOTE: &str =
    "Copy the above matrix to use during the interview for rating the candidate.";

/// Both variants surface to users as the same failure. They are kept apart
/// for logs.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("reply is not valid JSON: {0}")]
    Malformed(String),

    #[error("reply does not match the question set schema: {0}")]
    Shape(String),
}

/// One display block of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Bullets {
        title: String,
        items: Vec<String>,
    },
    Table {
        title: String,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl Section {
    pub fn title(&self) -> &str {
        match self {
            Section::Bullets { title, .. } | Section::Table { title, .. } => title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedReport {
    pub sections: Vec<Section>,
    pub note: String,
}

/// Parses a raw model reply. Code fences around the JSON are tolerated.
pub fn parse_reply(raw: &str) -> Result<QuestionSet, RenderError> {
    let text = strip_json_fences(raw);
    serde_json::from_str::<QuestionSet>(text).map_err(|e| match e.classify() {
        Category::Data => RenderError::Shape(e.to_string()),
        Category::Syntax | Category::Eof | Category::Io => RenderError::Malformed(e.to_string()),
    })
}

/// Projects a question set into display sections, in fixed order. The coding
/// section only appears when the reply carried `coding_questions`.
pub fn render(set: &QuestionSet) -> RenderedReport {
    let mut sections = Vec::with_capacity(4);

    sections.push(Section::Bullets {
        title: GENERAL_TITLE.to_string(),
        items: set.general_questions.clone(),
    });
    sections.push(Section::Bullets {
        title: TECHNICAL_TITLE.to_string(),
        items: set.technical_questions.clone(),
    });

    if let Some(coding) = &set.coding_questions {
        sections.push(Section::Bullets {
            title: CODING_TITLE.to_string(),
            items: coding
                .iter()
                .map(|q| format!("{} (Difficulty: {})", q.question, q.difficulty))
                .collect(),
        });
    }

    // Rating and comments stay blank for the interviewer.
    sections.push(Section::Table {
        title: MATRIX_TITLE.to_string(),
        columns: MATRIX_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: set
            .evaluation_matrix
            .iter()
            .map(|entry| vec![entry.skill.clone(), String::new(), String::new()])
            .collect(),
    });

    RenderedReport {
        sections,
        note: MATRIX_NOTE.to_string(),
    }
}

impl RenderedReport {
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        for section in &self.sections {
            out.push_str("### ");
            out.push_str(section.title());
            out.push_str("\n\n");

            match section {
                Section::Bullets { items, .. } => {
                    for item in items {
                        out.push_str("- ");
                        out.push_str(&single_line(item));
                        out.push('\n');
                    }
                }
                Section::Table { columns, rows, .. } => {
                    let headers: Vec<String> = columns.iter().map(|c| bold_cell(c)).collect();
                    out.push_str(&table_line(&headers));
                    let rule: Vec<String> = headers.iter().map(|h| "-".repeat(h.len())).collect();
                    out.push_str(&table_line(&rule));
                    for row in rows {
                        let cells: Vec<String> = row.iter().map(|c| bold_cell(c)).collect();
                        out.push_str(&table_line(&cells));
                    }
                }
            }
            out.push('\n');
        }

        out.push_str(&self.note);
        out.push('\n');
        out
    }
}

fn bold_cell(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("**{}**", single_line(text).replace('|', "\\|"))
    }
}

/// Line breaks inside model text would end a list item or table row early.
fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

fn table_line(cells: &[String]) -> String {
    let mut line = String::from("|");
    for cell in cells {
        if cell.is_empty() {
            line.push_str(" |");
        } else {
            line.push(' ');
            line.push_str(cell);
            line.push_str(" |");
        }
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::models::{CodingQuestion, Difficulty};

    const MINIMAL_REPLY: &str = r#"{"general_questions":["Q1"],"technical_questions":["Q2"],"evaluation_matrix":[{"skill":"Go","description":"backend"}]}"#;

    const FULL_REPLY: &str = r#"{
        "general_questions": ["Tell me about a project you led.", "How do you handle on-call?"],
        "technical_questions": ["Explain Go's scheduler."],
        "coding_questions": [
            {"question": "Implement an LRU cache.", "difficulty": "Medium"},
            {"question": "Merge k sorted lists.", "difficulty": "Hard"}
        ],
        "evaluation_matrix": [
            {"skill": "Go (3+ years)", "description": "Concurrency, tooling"},
            {"skill": "PostgreSQL", "description": "Schema design"}
        ]
    }"#;

    fn titles(report: &RenderedReport) -> Vec<&str> {
        report.sections.iter().map(Section::title).collect()
    }

    #[test]
    fn test_minimal_reply_scenario() {
        let set = parse_reply(MINIMAL_REPLY).unwrap();
        let report = render(&set);

        assert_eq!(
            titles(&report),
            vec![GENERAL_TITLE, TECHNICAL_TITLE, MATRIX_TITLE]
        );
        assert_eq!(
            report.sections[0],
            Section::Bullets {
                title: GENERAL_TITLE.to_string(),
                items: vec!["Q1".to_string()],
            }
        );
        assert_eq!(
            report.sections[1],
            Section::Bullets {
                title: TECHNICAL_TITLE.to_string(),
                items: vec!["Q2".to_string()],
            }
        );
        match &report.sections[2] {
            Section::Table { columns, rows, .. } => {
                assert_eq!(columns, &["Skill", "Rating (1-10)", "Comments"]);
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0], vec!["Go".to_string(), String::new(), String::new()]);
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn test_coding_section_annotates_difficulty() {
        let set = parse_reply(FULL_REPLY).unwrap();
        assert_eq!(
            set.coding_questions.as_deref(),
            Some(
                &[
                    CodingQuestion {
                        question: "Implement an LRU cache.".to_string(),
                        difficulty: Difficulty::Medium,
                    },
                    CodingQuestion {
                        question: "Merge k sorted lists.".to_string(),
                        difficulty: Difficulty::Hard,
                    },
                ][..]
            )
        );

        let report = render(&set);
        assert_eq!(
            titles(&report),
            vec![GENERAL_TITLE, TECHNICAL_TITLE, CODING_TITLE, MATRIX_TITLE]
        );
        match &report.sections[2] {
            Section::Bullets { items, .. } => assert_eq!(
                items,
                &[
                    "Implement an LRU cache. (Difficulty: Medium)",
                    "Merge k sorted lists. (Difficulty: Hard)",
                ]
            ),
            other => panic!("expected bullets, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_coding_list_still_renders_section() {
        let reply = r#"{"general_questions":[],"technical_questions":[],"coding_questions":[],"evaluation_matrix":[]}"#;
        let report = render(&parse_reply(reply).unwrap());
        assert_eq!(
            titles(&report),
            vec![GENERAL_TITLE, TECHNICAL_TITLE, CODING_TITLE, MATRIX_TITLE]
        );
    }

    #[test]
    fn test_not_json_is_malformed() {
        assert!(matches!(
            parse_reply("not json"),
            Err(RenderError::Malformed(_))
        ));
        assert!(matches!(parse_reply(""), Err(RenderError::Malformed(_))));
        assert!(matches!(
            parse_reply(r#"{"general_questions": ["Q1""#),
            Err(RenderError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_required_fields_are_shape_errors() {
        let missing_general =
            r#"{"technical_questions":[],"evaluation_matrix":[{"skill":"Go","description":""}]}"#;
        let missing_technical = r#"{"general_questions":[],"evaluation_matrix":[]}"#;
        let missing_matrix = r#"{"general_questions":[],"technical_questions":[]}"#;

        for reply in [missing_general, missing_technical, missing_matrix] {
            assert!(
                matches!(parse_reply(reply), Err(RenderError::Shape(_))),
                "expected shape error for {reply}"
            );
        }
    }

    #[test]
    fn test_wrong_types_are_shape_errors() {
        let cases = [
            r#"[]"#,
            r#"null"#,
            r#"{"general_questions":"Q1","technical_questions":[],"evaluation_matrix":[]}"#,
            r#"{"general_questions":null,"technical_questions":[],"evaluation_matrix":[]}"#,
            r#"{"general_questions":[],"technical_questions":[],"evaluation_matrix":[{"skill":"Go"}]}"#,
            r#"{"general_questions":[],"technical_questions":[],"coding_questions":[{"question":"x","difficulty":"Impossible"}],"evaluation_matrix":[]}"#,
        ];
        for reply in cases {
            assert!(
                matches!(parse_reply(reply), Err(RenderError::Shape(_))),
                "expected shape error for {reply}"
            );
        }
    }

    #[test]
    fn test_fenced_reply_is_accepted() {
        let fenced = format!("```json\n{MINIMAL_REPLY}\n```");
        let set = parse_reply(&fenced).unwrap();
        assert_eq!(set.general_questions, vec!["Q1"]);
    }

    #[test]
    fn test_markdown_matches_interview_layout() {
        let report = render(&parse_reply(MINIMAL_REPLY).unwrap());
        let expected = "\
### General Questions

- Q1

### Technical Questions

- Q2

### Evaluation Matrix

| **Skill** | **Rating (1-10)** | **Comments** |
| --------- | ----------------- | ------------ |
| **Go** | | |

Copy the above matrix to use during the interview for rating the candidate.
";
        assert_eq!(report.to_markdown(), expected);
    }

    #[test]
    fn test_markdown_escapes_pipes_in_skill_names() {
        let reply = r#"{"general_questions":[],"technical_questions":[],"evaluation_matrix":[{"skill":"C|C++","description":""}]}"#;
        let markdown = render(&parse_reply(reply).unwrap()).to_markdown();
        assert!(markdown.contains("| **C\\|C++** | | |"));
    }

    #[test]
    fn test_markdown_keeps_multiline_text_on_one_line() {
        let reply = r#"{"general_questions":["Walk me through\na recent outage."],"technical_questions":[],"evaluation_matrix":[{"skill":"Go\r\nconcurrency","description":""}]}"#;
        let markdown = render(&parse_reply(reply).unwrap()).to_markdown();
        assert!(markdown.contains("- Walk me through a recent outage.\n"));
        assert!(markdown.contains("| **Go concurrency** | | |\n"));
    }

    #[test]
    fn test_report_serializes_with_section_kind() {
        let report = render(&parse_reply(MINIMAL_REPLY).unwrap());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["sections"][0]["kind"], "bullets");
        assert_eq!(value["sections"][2]["kind"], "table");
        assert_eq!(value["sections"][2]["rows"][0][0], "Go");
    }
}
