//! Account sign-up and milestone capture.

pub mod domain;
pub mod intake;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CancellationView, CvUploadRequest, PersonalDiscoveryRequest, RegistrationRequest,
    RegistrationView, ScholarshipAssessmentRequest, SubscriptionRequest,
};
pub use intake::IntakeViolation;
pub use router::onboarding_router;
pub use service::{OnboardingError, OnboardingService};
