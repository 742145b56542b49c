pub mod provisioning_step_completed_event;
