use metrics_exporter_prometheus::PrometheusHandle;
use mentor_hub::workflows::onboarding::OnboardingService;
use mentor_hub::workflows::progress::{
    InMemoryMilestoneRepository, InMemoryUserRepository, ProgressService,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type MemoryProgressService =
    ProgressService<InMemoryUserRepository, InMemoryMilestoneRepository>;
pub(crate) type MemoryOnboardingService =
    OnboardingService<InMemoryUserRepository, InMemoryMilestoneRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Both services over one shared pair of process-local stores.
pub(crate) struct Workflows {
    pub(crate) progress: Arc<MemoryProgressService>,
    pub(crate) onboarding: Arc<MemoryOnboardingService>,
}

impl Workflows {
    pub(crate) fn in_memory() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let milestones = Arc::new(InMemoryMilestoneRepository::default());
        Self {
            progress: Arc::new(ProgressService::new(users.clone(), milestones.clone())),
            onboarding: Arc::new(OnboardingService::new(users, milestones)),
        }
    }
}
