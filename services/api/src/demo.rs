use crate::infra::Workflows;
use clap::Args;
use mentor_hub::error::AppError;
use mentor_hub::workflows::onboarding::{
    CvUploadRequest, PersonalDiscoveryRequest, RegistrationRequest, ScholarshipAssessmentRequest,
    SubscriptionRequest,
};
use mentor_hub::workflows::progress::{ProgressCheck, UserId};
use std::collections::BTreeMap;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Email used for the synthetic mentee account
    #[arg(long, default_value = "demo.mentee@example.com")]
    pub(crate) email: String,
    /// Display name for the synthetic mentee account
    #[arg(long, default_value = "Demo Mentee")]
    pub(crate) name: String,
    /// Print the dashboard payload after the final check
    #[arg(long)]
    pub(crate) dashboard: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let workflows = Workflows::in_memory();
    let onboarding = &workflows.onboarding;

    println!("Mentorship progress demo");
    let account = onboarding.register(RegistrationRequest {
        email: args.email,
        full_name: args.name,
    })?;
    println!(
        "  Registered {} ({}) at {}",
        account.full_name, account.id, account.progress_status
    );

    let user = account.id;
    print_check(&workflows, &user, "before any milestone")?;

    onboarding.activate_subscription(
        &user,
        SubscriptionRequest {
            plan_id: "premium".to_string(),
        },
    )?;
    print_check(&workflows, &user, "subscription activated")?;

    let mut answers = BTreeMap::new();
    answers.insert("goal".to_string(), "Master's abroad".to_string());
    onboarding.submit_personal_discovery(&user, PersonalDiscoveryRequest { answers })?;
    print_check(&workflows, &user, "personal discovery submitted")?;

    onboarding.upload_cv(
        &user,
        CvUploadRequest {
            file_name: "demo-cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            storage_key: format!("cvs/{user}/demo-cv.pdf"),
        },
    )?;
    print_check(&workflows, &user, "cv uploaded")?;

    let mut scores = BTreeMap::new();
    scores.insert("academic_record".to_string(), 82);
    scores.insert("leadership".to_string(), 74);
    onboarding.submit_scholarship_assessment(&user, ScholarshipAssessmentRequest { scores })?;
    print_check(&workflows, &user, "scholarship assessment submitted")?;

    // Nothing new recorded: the status holds at the essays stage.
    print_check(&workflows, &user, "no new milestone")?;

    if args.dashboard {
        let dashboard = workflows.progress.dashboard(&user)?;
        match serde_json::to_string_pretty(&dashboard) {
            Ok(json) => println!("\nDashboard payload:\n{json}"),
            Err(err) => println!("\nDashboard payload unavailable: {err}"),
        }
    }

    Ok(())
}

fn print_check(
    workflows: &Workflows,
    user: &UserId,
    label: &str,
) -> Result<ProgressCheck, AppError> {
    let check = workflows.progress.check(user)?;
    let marker = if check.advanced { "->" } else { "==" };
    println!(
        "  {label:<34} {} {marker} {}",
        check.previous_status, check.progress_status
    );
    Ok(check)
}
