pub mod authorization_grant_outcome;
pub mod catalog_change;
pub mod database_provisioning_outcome;
pub mod endpoint_reachability;
pub mod provisioner_domain_error;
pub mod provisioning_step;
