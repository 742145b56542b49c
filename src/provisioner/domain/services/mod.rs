pub mod database_provisioning_command_service;
pub mod provisioning_step_listener;
