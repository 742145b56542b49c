use crate::provisioner::domain::model::events::provisioning_step_completed_event::ProvisioningStepCompletedEvent;

/// Notified as each provisioning step finishes, before the next one starts.
pub trait ProvisioningStepListener: Send + Sync {
    fn on_step_completed(&self, event: &ProvisioningStepCompletedEvent);
}

pub struct SilentProvisioningStepListener;

impl ProvisioningStepListener for SilentProvisioningStepListener {
    fn on_step_completed(&self, _event: &ProvisioningStepCompletedEvent) {}
}
