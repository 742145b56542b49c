pub mod completed_step_resource;
pub mod failure_report_resource;
pub mod provision_arguments_resource;
pub mod provisioning_result_resource;
