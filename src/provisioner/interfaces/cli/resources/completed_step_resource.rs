use serde::{Deserialize, Serialize};

use crate::provisioner::domain::model::events::provisioning_step_completed_event::ProvisioningStepCompletedEvent;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompletedStepResource {
    pub step: String,
    pub outcome: String,
    pub completed_at: String,
}

impl From<&ProvisioningStepCompletedEvent> for CompletedStepResource {
    fn from(event: &ProvisioningStepCompletedEvent) -> Self {
        Self {
            step: event.step.as_str().to_string(),
            outcome: event.outcome.clone(),
            completed_at: event.occurred_at.to_rfc3339(),
        }
    }
}

impl CompletedStepResource {
    pub fn render_text(&self) -> String {
        format!("[ok] {}: {}", self.step, self.outcome)
    }
}
