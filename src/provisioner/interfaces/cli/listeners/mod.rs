pub mod console_provisioning_step_listener;
