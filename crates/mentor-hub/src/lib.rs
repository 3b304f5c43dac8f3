//! Onboarding progress tracking for the mentorship platform.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_support;
