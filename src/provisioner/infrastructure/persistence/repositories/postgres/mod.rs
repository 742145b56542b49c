pub mod sql_identifier;
pub mod sqlx_database_server_administration_repository_impl;
