use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for platform accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Onboarding stage recorded on every account.
///
/// Declaration order is the progression order, so the derived `Ord` and
/// [`ProgressStatus::index`] agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    PaymentPending,
    PersonalDiscoveryPending,
    CvAlignmentPending,
    ScholarshipMatrixPending,
    EssaysPending,
    Completed,
}

impl ProgressStatus {
    pub const ALL: [ProgressStatus; 6] = [
        ProgressStatus::PaymentPending,
        ProgressStatus::PersonalDiscoveryPending,
        ProgressStatus::CvAlignmentPending,
        ProgressStatus::ScholarshipMatrixPending,
        ProgressStatus::EssaysPending,
        ProgressStatus::Completed,
    ];

    pub const fn initial() -> Self {
        ProgressStatus::PaymentPending
    }

    /// Position in the fixed progression, starting at zero.
    pub const fn index(self) -> usize {
        match self {
            ProgressStatus::PaymentPending => 0,
            ProgressStatus::PersonalDiscoveryPending => 1,
            ProgressStatus::CvAlignmentPending => 2,
            ProgressStatus::ScholarshipMatrixPending => 3,
            ProgressStatus::EssaysPending => 4,
            ProgressStatus::Completed => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ProgressStatus::PaymentPending => "PAYMENT_PENDING",
            ProgressStatus::PersonalDiscoveryPending => "PERSONAL_DISCOVERY_PENDING",
            ProgressStatus::CvAlignmentPending => "CV_ALIGNMENT_PENDING",
            ProgressStatus::ScholarshipMatrixPending => "SCHOLARSHIP_MATRIX_PENDING",
            ProgressStatus::EssaysPending => "ESSAYS_PENDING",
            ProgressStatus::Completed => "COMPLETED",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProgressStatus::PaymentPending => "Payment pending",
            ProgressStatus::PersonalDiscoveryPending => "Personal discovery pending",
            ProgressStatus::CvAlignmentPending => "CV alignment pending",
            ProgressStatus::ScholarshipMatrixPending => "Scholarship matrix pending",
            ProgressStatus::EssaysPending => "Essays pending",
            ProgressStatus::Completed => "Completed",
        }
    }

    pub const fn successor(self) -> Option<Self> {
        match self {
            ProgressStatus::PaymentPending => Some(ProgressStatus::PersonalDiscoveryPending),
            ProgressStatus::PersonalDiscoveryPending => Some(ProgressStatus::CvAlignmentPending),
            ProgressStatus::CvAlignmentPending => Some(ProgressStatus::ScholarshipMatrixPending),
            ProgressStatus::ScholarshipMatrixPending => Some(ProgressStatus::EssaysPending),
            ProgressStatus::EssaysPending => Some(ProgressStatus::Completed),
            ProgressStatus::Completed => None,
        }
    }

    /// Milestone that unlocks the automatic move out of this status.
    ///
    /// `EssaysPending` has no gate: leaving it is not automated.
    pub const fn gate(self) -> Option<Milestone> {
        match self {
            ProgressStatus::PaymentPending => Some(Milestone::ActiveSubscription),
            ProgressStatus::PersonalDiscoveryPending => Some(Milestone::PersonalDiscovery),
            ProgressStatus::CvAlignmentPending => Some(Milestone::UploadedCv),
            ProgressStatus::ScholarshipMatrixPending => Some(Milestone::ScholarshipAssessment),
            ProgressStatus::EssaysPending | ProgressStatus::Completed => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, ProgressStatus::Completed)
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        ProgressStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("unknown progress status: {s}"))
    }
}

/// Onboarding steps whose records drive progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    ActiveSubscription,
    PersonalDiscovery,
    UploadedCv,
    ScholarshipAssessment,
}

impl Milestone {
    pub const fn label(self) -> &'static str {
        match self {
            Milestone::ActiveSubscription => "active subscription",
            Milestone::PersonalDiscovery => "personal discovery",
            Milestone::UploadedCv => "uploaded CV",
            Milestone::ScholarshipAssessment => "scholarship assessment",
        }
    }
}

/// Presence flags for the four milestone record sets of a single user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneSignals {
    pub has_active_subscription: bool,
    pub has_personal_discovery: bool,
    pub has_uploaded_cv: bool,
    pub has_scholarship_assessment: bool,
}

impl MilestoneSignals {
    pub const fn all() -> Self {
        Self {
            has_active_subscription: true,
            has_personal_discovery: true,
            has_uploaded_cv: true,
            has_scholarship_assessment: true,
        }
    }

    pub const fn is_met(&self, milestone: Milestone) -> bool {
        match milestone {
            Milestone::ActiveSubscription => self.has_active_subscription,
            Milestone::PersonalDiscovery => self.has_personal_discovery,
            Milestone::UploadedCv => self.has_uploaded_cv,
            Milestone::ScholarshipAssessment => self.has_scholarship_assessment,
        }
    }
}

/// Account row as seen by the progress workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub progress_status: ProgressStatus,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(email: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            full_name: full_name.into(),
            progress_status: ProgressStatus::initial(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: UserId,
    pub plan_id: String,
    pub status: SubscriptionStatus,
    pub started_at: DateTime<Utc>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDiscovery {
    pub user_id: UserId,
    pub answers: BTreeMap<String, String>,
    pub submitted_at: DateTime<Utc>,
}

/// Metadata for a CV held in object storage. The file bytes never pass through here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvDocument {
    pub id: Uuid,
    pub user_id: UserId,
    pub file_name: String,
    pub content_type: String,
    pub storage_key: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipAssessment {
    pub user_id: UserId,
    pub scores: BTreeMap<String, u8>,
    pub submitted_at: DateTime<Utc>,
}
