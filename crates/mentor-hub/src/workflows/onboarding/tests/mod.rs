mod intake;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::test_support::stores;
use crate::workflows::onboarding::domain::{
    CvUploadRequest, PersonalDiscoveryRequest, RegistrationRequest, ScholarshipAssessmentRequest,
};
use crate::workflows::onboarding::OnboardingService;
use crate::workflows::progress::{InMemoryMilestoneRepository, InMemoryUserRepository};

type MemoryOnboarding = OnboardingService<InMemoryUserRepository, InMemoryMilestoneRepository>;

fn build_onboarding() -> (
    MemoryOnboarding,
    Arc<InMemoryUserRepository>,
    Arc<InMemoryMilestoneRepository>,
) {
    let (users, milestones) = stores();
    let service = OnboardingService::new(users.clone(), milestones.clone());
    (service, users, milestones)
}

fn registration(email: &str) -> RegistrationRequest {
    RegistrationRequest {
        email: email.to_string(),
        full_name: "Grace Hopper".to_string(),
    }
}

fn discovery() -> PersonalDiscoveryRequest {
    let mut answers = BTreeMap::new();
    answers.insert("target_degree".to_string(), "MSc Computer Science".to_string());
    answers.insert("motivation".to_string(), "Research in compilers".to_string());
    PersonalDiscoveryRequest { answers }
}

fn cv_upload() -> CvUploadRequest {
    CvUploadRequest {
        file_name: "grace-hopper-cv.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        storage_key: "cvs/grace/cv.pdf".to_string(),
    }
}

fn assessment() -> ScholarshipAssessmentRequest {
    let mut scores = BTreeMap::new();
    scores.insert("academic_record".to_string(), 85);
    scores.insert("leadership".to_string(), 70);
    ScholarshipAssessmentRequest { scores }
}
