use std::collections::BTreeMap;

use super::domain::{
    CvUploadRequest, PersonalDiscoveryRequest, RegistrationRequest, ScholarshipAssessmentRequest,
};

pub const CV_CONTENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub const MAX_ASSESSMENT_SCORE: u16 = 100;

/// Validation errors raised before any record is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("{0} must not be blank")]
    Blank(&'static str),
    #[error("personal discovery needs at least one answer")]
    EmptyDiscovery,
    #[error("unsupported CV content type: {0}")]
    UnsupportedContentType(String),
    #[error("scholarship assessment needs at least one criterion")]
    EmptyAssessment,
    #[error("score for '{criterion}' must be between 0 and 100, found {found}")]
    ScoreOutOfRange { criterion: String, found: u16 },
    #[error("criterion '{0}' was submitted more than once")]
    DuplicateCriterion(String),
    #[error("question '{0}' was answered more than once")]
    DuplicateQuestion(String),
}

/// Lower-cased, trimmed e-mail used as the uniqueness key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn require(value: &str, field: &'static str) -> Result<String, IntakeViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(IntakeViolation::Blank(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Returns `(email, full_name)` ready for storage.
pub fn check_registration(
    request: &RegistrationRequest,
) -> Result<(String, String), IntakeViolation> {
    let email = normalize_email(&request.email);
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && domain.split('.').all(|label| !label.is_empty())
        }
        None => false,
    };
    if !valid || email.chars().any(char::is_whitespace) {
        return Err(IntakeViolation::InvalidEmail);
    }

    let full_name = require(&request.full_name, "full name")?;
    Ok((email, full_name))
}

pub fn check_plan(plan_id: &str) -> Result<String, IntakeViolation> {
    require(plan_id, "plan id")
}

pub fn check_discovery(
    request: PersonalDiscoveryRequest,
) -> Result<BTreeMap<String, String>, IntakeViolation> {
    let mut answers = BTreeMap::new();
    for (question, answer) in request.answers {
        let (question, answer) = (question.trim(), answer.trim());
        if question.is_empty() || answer.is_empty() {
            continue;
        }
        if answers.contains_key(question) {
            return Err(IntakeViolation::DuplicateQuestion(question.to_string()));
        }
        answers.insert(question.to_string(), answer.to_string());
    }

    if answers.is_empty() {
        Err(IntakeViolation::EmptyDiscovery)
    } else {
        Ok(answers)
    }
}

pub fn check_cv(request: CvUploadRequest) -> Result<CvUploadRequest, IntakeViolation> {
    let file_name = require(&request.file_name, "file name")?;
    let storage_key = require(&request.storage_key, "storage key")?;
    let content_type = request.content_type.trim().to_ascii_lowercase();
    if !CV_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(IntakeViolation::UnsupportedContentType(request.content_type));
    }

    Ok(CvUploadRequest {
        file_name,
        content_type,
        storage_key,
    })
}

pub fn check_assessment(
    request: ScholarshipAssessmentRequest,
) -> Result<BTreeMap<String, u8>, IntakeViolation> {
    if request.scores.is_empty() {
        return Err(IntakeViolation::EmptyAssessment);
    }

    let mut scores = BTreeMap::new();
    for (criterion, score) in request.scores {
        let criterion = require(&criterion, "criterion")?;
        if score > MAX_ASSESSMENT_SCORE {
            return Err(IntakeViolation::ScoreOutOfRange {
                criterion,
                found: score,
            });
        }
        if scores.contains_key(&criterion) {
            return Err(IntakeViolation::DuplicateCriterion(criterion));
        }
        scores.insert(criterion, score as u8);
    }
    Ok(scores)
}
