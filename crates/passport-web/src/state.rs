use std::sync::Arc;

use passport_core::{PipelineOrchestrator, UpstreamClient};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<PipelineOrchestrator>,
}

impl AppState {
    pub fn new(client: UpstreamClient) -> Self {
        Self {
            orchestrator: Arc::new(PipelineOrchestrator::new(client)),
        }
    }

    pub fn upstream(&self) -> &UpstreamClient {
        self.orchestrator.client()
    }
}
