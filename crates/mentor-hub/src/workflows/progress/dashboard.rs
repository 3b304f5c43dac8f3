use serde::Serialize;

use super::domain::ProgressStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Current,
    Upcoming,
}

/// Guidance entry rendered on the dashboard for a stage still ahead of the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextStep {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub state: StepState,
}

struct StepTemplate {
    status: ProgressStatus,
    key: &'static str,
    title: &'static str,
    description: &'static str,
}

const STEP_TEMPLATES: [StepTemplate; 5] = [
    StepTemplate {
        status: ProgressStatus::PaymentPending,
        key: "payment",
        title: "Choose a plan",
        description: "Activate a mentorship plan to unlock the onboarding program.",
    },
    StepTemplate {
        status: ProgressStatus::PersonalDiscoveryPending,
        key: "personal_discovery",
        title: "Complete your personal discovery",
        description: "Tell us about your goals, background and target programs.",
    },
    StepTemplate {
        status: ProgressStatus::CvAlignmentPending,
        key: "cv_alignment",
        title: "Upload your CV",
        description: "Upload a PDF or Word CV so your mentor can align it with your targets.",
    },
    StepTemplate {
        status: ProgressStatus::ScholarshipMatrixPending,
        key: "scholarship_matrix",
        title: "Fill in the scholarship matrix",
        description: "Rate each scholarship criterion to build your assessment.",
    },
    StepTemplate {
        status: ProgressStatus::EssaysPending,
        key: "essays",
        title: "Work on your essays",
        description: "Draft and review your application essays with your mentor.",
    },
];

/// Share of the onboarding program completed, in whole percent.
pub const fn completion_percentage(status: ProgressStatus) -> u8 {
    (status.index() * 20) as u8
}

/// Stages not yet completed, starting with the current one.
pub fn next_steps(status: ProgressStatus) -> Vec<NextStep> {
    STEP_TEMPLATES
        .iter()
        .filter(|template| template.status >= status)
        .map(|template| NextStep {
            key: template.key,
            title: template.title,
            description: template.description,
            state: if template.status == status {
                StepState::Current
            } else {
                StepState::Upcoming
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_tracks_status_index() {
        assert_eq!(completion_percentage(ProgressStatus::PaymentPending), 0);
        assert_eq!(completion_percentage(ProgressStatus::CvAlignmentPending), 40);
        assert_eq!(completion_percentage(ProgressStatus::EssaysPending), 80);
        assert_eq!(completion_percentage(ProgressStatus::Completed), 100);
    }

    #[test]
    fn next_steps_start_at_current_stage() {
        let steps = next_steps(ProgressStatus::CvAlignmentPending);
        let keys: Vec<_> = steps.iter().map(|step| step.key).collect();
        assert_eq!(keys, ["cv_alignment", "scholarship_matrix", "essays"]);
        assert_eq!(steps[0].state, StepState::Current);
        assert!(steps[1..]
            .iter()
            .all(|step| step.state == StepState::Upcoming));
    }

    #[test]
    fn completed_has_no_next_steps() {
        assert!(next_steps(ProgressStatus::Completed).is_empty());
    }

    #[test]
    fn every_open_stage_has_a_template() {
        for status in ProgressStatus::ALL {
            let expected = if status.is_terminal() { 0 } else { 5 - status.index() };
            assert_eq!(next_steps(status).len(), expected, "{status}");
        }
    }
}
