use std::sync::Mutex;

use crate::provisioner::{
    domain::{
        model::events::provisioning_step_completed_event::ProvisioningStepCompletedEvent,
        services::provisioning_step_listener::ProvisioningStepListener,
    },
    interfaces::cli::resources::{
        completed_step_resource::CompletedStepResource,
        provision_arguments_resource::OutputFormatResource,
    },
};

/// Prints a progress line per step in text mode and keeps every completed
/// step for the final report.
pub struct ConsoleProvisioningStepListener {
    format: OutputFormatResource,
    completed_steps: Mutex<Vec<CompletedStepResource>>,
}

impl ConsoleProvisioningStepListener {
    pub fn new(format: OutputFormatResource) -> Self {
        Self {
            format,
            completed_steps: Mutex::new(Vec::new()),
        }
    }

    pub fn completed_steps(&self) -> Vec<CompletedStepResource> {
        match self.completed_steps.lock() {
            Ok(steps) => steps.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProvisioningStepListener for ConsoleProvisioningStepListener {
    fn on_step_completed(&self, event: &ProvisioningStepCompletedEvent) {
        let step = CompletedStepResource::from(event);

        if self.format == OutputFormatResource::Text {
            println!("{}", step.render_text());
        }

        match self.completed_steps.lock() {
            Ok(mut steps) => steps.push(step),
            Err(poisoned) => poisoned.into_inner().push(step),
        }
    }
}
