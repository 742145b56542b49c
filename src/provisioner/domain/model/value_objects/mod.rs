pub mod owner_role_name;
pub mod principal_name;
pub mod provisioned_database_name;
pub mod server_endpoint;
pub mod server_service_name;
