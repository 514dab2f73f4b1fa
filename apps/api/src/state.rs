use std::sync::Arc;

use crate::config::Config;
use crate::review::service::ResumeService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The upload workflow, wired with its collaborators at startup.
    pub resumes: Arc<ResumeService>,
    pub config: Config,
}
