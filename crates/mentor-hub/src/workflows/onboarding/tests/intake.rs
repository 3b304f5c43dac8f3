use std::collections::BTreeMap;

use super::{assessment, cv_upload, discovery, registration};
use crate::workflows::onboarding::domain::{
    PersonalDiscoveryRequest, RegistrationRequest, ScholarshipAssessmentRequest,
};
use crate::workflows::onboarding::intake::{
    check_assessment, check_cv, check_discovery, check_plan, check_registration,
    IntakeViolation,
};

#[test]
fn registration_normalizes_email_and_name() {
    let request = RegistrationRequest {
        email: "  Grace@Example.COM ".to_string(),
        full_name: "  Grace Hopper ".to_string(),
    };
    let (email, name) = check_registration(&request).expect("valid registration");
    assert_eq!(email, "grace@example.com");
    assert_eq!(name, "Grace Hopper");
}

#[test]
fn registration_rejects_malformed_email() {
    for email in [
        "",
        "grace",
        "@example.com",
        "grace@localhost",
        "grace@.com",
        "gr ace@example.com",
        "grace@@example.com",
        "grace@example..com",
    ] {
        assert_eq!(
            check_registration(&registration(email)),
            Err(IntakeViolation::InvalidEmail),
            "{email:?}"
        );
    }
}

#[test]
fn registration_requires_a_name() {
    let mut request = registration("grace@example.com");
    request.full_name = "   ".to_string();
    assert_eq!(
        check_registration(&request),
        Err(IntakeViolation::Blank("full name"))
    );
}

#[test]
fn plan_id_must_not_be_blank() {
    assert_eq!(check_plan(" premium "), Ok("premium".to_string()));
    assert_eq!(check_plan(""), Err(IntakeViolation::Blank("plan id")));
}

#[test]
fn discovery_drops_blank_answers() {
    let mut request = discovery();
    request
        .answers
        .insert("hobbies".to_string(), "   ".to_string());
    let answers = check_discovery(request).expect("valid discovery");
    assert_eq!(answers.len(), 2);
    assert!(!answers.contains_key("hobbies"));

    let empty = PersonalDiscoveryRequest {
        answers: BTreeMap::from([("q".to_string(), " ".to_string())]),
    };
    assert_eq!(check_discovery(empty), Err(IntakeViolation::EmptyDiscovery));
}

#[test]
fn cv_accepts_pdf_and_word_only() {
    let mut request = cv_upload();
    request.content_type = "Application/MSWord".to_string();
    let checked = check_cv(request).expect("word accepted");
    assert_eq!(checked.content_type, "application/msword");

    let mut request = cv_upload();
    request.content_type = "image/png".to_string();
    assert_eq!(
        check_cv(request),
        Err(IntakeViolation::UnsupportedContentType("image/png".to_string()))
    );

    let mut request = cv_upload();
    request.storage_key = String::new();
    assert_eq!(check_cv(request), Err(IntakeViolation::Blank("storage key")));
}

#[test]
fn assessment_scores_must_be_in_range() {
    let scores = check_assessment(assessment()).expect("valid assessment");
    assert_eq!(scores.get("academic_record"), Some(&85));

    let mut request = assessment();
    request.scores.insert("essays".to_string(), 101);
    assert_eq!(
        check_assessment(request),
        Err(IntakeViolation::ScoreOutOfRange {
            criterion: "essays".to_string(),
            found: 101,
        })
    );

    let mut request = assessment();
    request.scores.clear();
    assert_eq!(check_assessment(request), Err(IntakeViolation::EmptyAssessment));
}

#[test]
fn assessment_rejects_criteria_that_collide_after_trimming() {
    let request = ScholarshipAssessmentRequest {
        scores: BTreeMap::from([
            ("leadership".to_string(), 90),
            (" leadership".to_string(), 10),
        ]),
    };
    assert_eq!(
        check_assessment(request),
        Err(IntakeViolation::DuplicateCriterion("leadership".to_string()))
    );
}

#[test]
fn discovery_rejects_questions_that_collide_after_trimming() {
    let request = PersonalDiscoveryRequest {
        answers: BTreeMap::from([
            ("goal".to_string(), "PhD".to_string()),
            ("goal ".to_string(), "MBA".to_string()),
        ]),
    };
    assert_eq!(
        check_discovery(request),
        Err(IntakeViolation::DuplicateQuestion("goal".to_string()))
    );
}
