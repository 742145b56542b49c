pub mod authorization_grant_report;
pub mod provisioning_result;
