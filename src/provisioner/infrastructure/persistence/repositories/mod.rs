pub mod database_server_administration_repository;
pub mod file;
pub mod postgres;
pub mod provisioning_transcript_repository;
