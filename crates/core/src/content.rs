//! Field rules for quizzes, keyword sets, subjects, categories and scores.
//!
//! Pure functions over borrowed inputs; the API layer calls these before
//! touching the database.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const QUESTION_MIN_LEN: usize = 5;
pub const QUESTION_MAX_LEN: usize = 1000;
pub const MIN_CHOICES: usize = 2;
pub const MAX_CHOICES: usize = 6;
pub const MAX_IMAGES: usize = 5;
pub const MIN_YEAR: i16 = 1;
pub const MAX_YEAR: i16 = 6;

/// Stored image references are either legacy public files or served by the
/// image endpoint.
static IMAGE_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/(public/(subjects|quizzes)|api/v1/images)/[A-Za-z0-9._-]+$")
        .expect("valid regex")
});

// ---------------------------------------------------------------------------
// Question type
// ---------------------------------------------------------------------------

/// How a quiz question may be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Both,
    Choice,
    Written,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Both => "both",
            QuestionType::Choice => "choice",
            QuestionType::Written => "written",
        }
    }

    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            "both" => Ok(QuestionType::Both),
            "choice" => Ok(QuestionType::Choice),
            "written" => Ok(QuestionType::Written),
            other => Err(CoreError::Validation(format!(
                "Invalid question type '{other}'. Must be one of: both, choice, written"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Check the trimmed character length of `value` against `[min, max]`.
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), CoreError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(CoreError::Validation(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}

pub fn validate_year(year: i16) -> Result<(), CoreError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CoreError::Validation(format!(
            "Year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
        )));
    }
    Ok(())
}

pub fn validate_image_path(path: &str) -> Result<(), CoreError> {
    if !IMAGE_PATH_RE.is_match(path) {
        return Err(CoreError::Validation(format!("Invalid image path: {path}")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entity rules
// ---------------------------------------------------------------------------

pub fn validate_subject(
    name: &str,
    description: &str,
    year: i16,
    image: Option<&str>,
) -> Result<(), CoreError> {
    validate_length("Name", name, 2, 100)?;
    validate_length("Description", description, 10, 1000)?;
    validate_year(year)?;
    if let Some(image) = image {
        validate_image_path(image)?;
    }
    Ok(())
}

pub fn validate_category(name: &str, description: &str) -> Result<(), CoreError> {
    validate_length("Name", name, 2, 100)?;
    validate_length("Description", description, 10, 500)
}

/// Validate the content fields of a quiz question.
///
/// For `choice` questions there must be 2-6 distinct non-empty choices and
/// exactly one correct answer taken from them. Other types need at least
/// one correct answer.
pub fn validate_quiz(
    question: &str,
    question_type: QuestionType,
    choices: &[String],
    correct_answers: &[String],
    images: &[String],
) -> Result<(), CoreError> {
    validate_length("Question", question, QUESTION_MIN_LEN, QUESTION_MAX_LEN)?;

    if correct_answers.iter().all(|a| a.trim().is_empty()) {
        return Err(CoreError::Validation(
            "At least one correct answer is required".into(),
        ));
    }

    if question_type == QuestionType::Choice {
        if !(MIN_CHOICES..=MAX_CHOICES).contains(&choices.len()) {
            return Err(CoreError::Validation(format!(
                "Choice questions need between {MIN_CHOICES} and {MAX_CHOICES} choices"
            )));
        }
        if choices.iter().any(|c| c.trim().is_empty()) {
            return Err(CoreError::Validation("Choices must not be empty".into()));
        }
        if correct_answers.len() != 1 {
            return Err(CoreError::Validation(
                "Choice questions must have exactly one correct answer".into(),
            ));
        }
        if !correct_answers.iter().all(|a| choices.contains(a)) {
            return Err(CoreError::Validation(
                "Correct answer must be one of the choices".into(),
            ));
        }
    }

    if images.len() > MAX_IMAGES {
        return Err(CoreError::Validation(format!(
            "A quiz may have at most {MAX_IMAGES} images"
        )));
    }
    images.iter().try_for_each(|p| validate_image_path(p))
}

/// Validate a keyword set. Global sets need no subject or category.
pub fn validate_keyword(
    name: &str,
    keywords: &[String],
    is_global: bool,
    subject_id: Option<i64>,
    category_id: Option<i64>,
) -> Result<(), CoreError> {
    validate_length("Name", name, 2, 200)?;
    if keywords.is_empty() || keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(CoreError::Validation(
            "Keywords must be a non-empty list of non-empty strings".into(),
        ));
    }
    if !is_global && (subject_id.is_none() || category_id.is_none()) {
        return Err(CoreError::Validation(
            "Subject and category are required unless the keyword set is global".into(),
        ));
    }
    Ok(())
}

/// Validate a recorded quiz attempt.
pub fn validate_score(
    score: i32,
    full_score: i32,
    question_count: usize,
    category_count: usize,
    time_taken_secs: i32,
) -> Result<(), CoreError> {
    if full_score < 1 {
        return Err(CoreError::Validation("Full score must be at least 1".into()));
    }
    if !(0..=full_score).contains(&score) {
        return Err(CoreError::Validation(format!(
            "Score must be between 0 and {full_score}"
        )));
    }
    if category_count == 0 {
        return Err(CoreError::Validation(
            "At least one category is required".into(),
        ));
    }
    if question_count == 0 || question_count != full_score as usize {
        return Err(CoreError::Validation(format!(
            "Expected {full_score} answered questions, got {question_count}"
        )));
    }
    if time_taken_secs < 0 {
        return Err(CoreError::Validation(
            "Time taken must not be negative".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn question_type_parses_known_names() {
        assert_eq!(QuestionType::parse("choice").unwrap(), QuestionType::Choice);
        assert_matches!(QuestionType::parse("essay"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn image_paths() {
        assert!(validate_image_path("/api/v1/images/abc-123.png").is_ok());
        assert!(validate_image_path("/public/subjects/anatomy.jpg").is_ok());
        assert!(validate_image_path("/etc/passwd").is_err());
        assert!(validate_image_path("/api/v1/images/../secret").is_err());
    }

    #[test]
    fn valid_choice_quiz() {
        let result = validate_quiz(
            "Which bone is the longest?",
            QuestionType::Choice,
            &strings(&["Femur", "Tibia", "Ulna"]),
            &strings(&["Femur"]),
            &[],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn choice_quiz_answer_must_be_a_choice() {
        let result = validate_quiz(
            "Which bone is the longest?",
            QuestionType::Choice,
            &strings(&["Femur", "Tibia"]),
            &strings(&["Radius"]),
            &[],
        );
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn choice_quiz_needs_two_choices() {
        let result = validate_quiz(
            "Which bone is the longest?",
            QuestionType::Choice,
            &strings(&["Femur"]),
            &strings(&["Femur"]),
            &[],
        );
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn written_quiz_ignores_choices() {
        let result = validate_quiz(
            "Name the longest bone.",
            QuestionType::Written,
            &[],
            &strings(&["Femur", "femur"]),
            &[],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn short_question_rejected() {
        let result = validate_quiz("Hi?", QuestionType::Written, &[], &strings(&["x"]), &[]);
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn too_many_images_rejected() {
        let images: Vec<String> = (0..6).map(|i| format!("/api/v1/images/{i}.png")).collect();
        let result = validate_quiz(
            "Name the longest bone.",
            QuestionType::Written,
            &[],
            &strings(&["Femur"]),
            &images,
        );
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn keyword_scope_rules() {
        let kws = strings(&["mitosis", "meiosis"]);
        assert!(validate_keyword("Cell division", &kws, true, None, None).is_ok());
        assert!(validate_keyword("Cell division", &kws, false, Some(1), Some(2)).is_ok());
        assert!(validate_keyword("Cell division", &kws, false, Some(1), None).is_err());
        assert!(validate_keyword("Cell division", &[], true, None, None).is_err());
    }

    #[test]
    fn subject_and_category_rules() {
        assert!(validate_subject("Anatomy", "Structure of the human body", 1, None).is_ok());
        assert!(validate_subject("Anatomy", "Structure of the human body", 7, None).is_err());
        assert!(validate_subject("A", "Structure of the human body", 1, None).is_err());
        assert!(validate_category("Bones", "Skeletal system basics").is_ok());
        assert!(validate_category("Bones", "short").is_err());
    }

    #[test]
    fn score_rules() {
        assert!(validate_score(3, 5, 5, 1, 120).is_ok());
        assert!(validate_score(6, 5, 5, 1, 120).is_err());
        assert!(validate_score(3, 5, 4, 1, 120).is_err());
        assert!(validate_score(3, 5, 5, 0, 120).is_err());
        assert!(validate_score(3, 0, 0, 1, 120).is_err());
        assert!(validate_score(3, 5, 5, 1, -1).is_err());
    }
}
