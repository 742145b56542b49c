use chrono::{DateTime, Utc};

use crate::provisioner::domain::model::enums::provisioning_step::ProvisioningStep;

#[derive(Clone, Debug)]
pub struct ProvisioningStepCompletedEvent {
    pub step: ProvisioningStep,
    pub outcome: String,
    pub occurred_at: DateTime<Utc>,
}

impl ProvisioningStepCompletedEvent {
    pub fn new(step: ProvisioningStep, outcome: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            step,
            outcome: outcome.into(),
            occurred_at,
        }
    }

    pub fn summary(&self) -> String {
        format!("{} {}", self.step.as_str(), self.outcome)
    }
}
