pub mod onboarding;
pub mod progress;
