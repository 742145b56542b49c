use std::sync::Arc;

use crate::{
    config::app_config::{AppConfig, ServerControlMode},
    provisioner::{
        application::command_services::database_provisioning_command_service_impl::DatabaseProvisioningCommandServiceImpl,
        domain::model::{
            enums::provisioner_domain_error::ProvisionerDomainError,
            value_objects::server_service_name::ServerServiceName,
        },
        infrastructure::{
            persistence::repositories::{
                file::{
                    disabled_provisioning_transcript_repository_impl::DisabledProvisioningTranscriptRepositoryImpl,
                    file_provisioning_transcript_repository_impl::FileProvisioningTranscriptRepositoryImpl,
                },
                postgres::sqlx_database_server_administration_repository_impl::SqlxDatabaseServerAdministrationRepositoryImpl,
                provisioning_transcript_repository::ProvisioningTranscriptRepository,
            },
            process::{
                controllers::{
                    pg_ctl_server_process_controller_impl::PgCtlServerProcessControllerImpl,
                    systemctl_server_process_controller_impl::SystemctlServerProcessControllerImpl,
                    unmanaged_server_process_controller_impl::UnmanagedServerProcessControllerImpl,
                },
                server_process_controller::ServerProcessController,
            },
        },
    },
};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub fn build_database_provisioning_command_service(
    config: &AppConfig,
) -> Result<DatabaseProvisioningCommandServiceImpl, ProvisionerDomainError> {
    let transcript_repository: Arc<dyn ProvisioningTranscriptRepository> =
        match &config.transcript_path {
            Some(path) => Arc::new(FileProvisioningTranscriptRepositoryImpl::new(path.clone())),
            None => Arc::new(DisabledProvisioningTranscriptRepositoryImpl),
        };

    let administration_repository = Arc::new(SqlxDatabaseServerAdministrationRepositoryImpl::new(
        config,
        transcript_repository.clone(),
    ));

    let process_controller = build_server_process_controller(config)?;

    Ok(DatabaseProvisioningCommandServiceImpl::new(
        administration_repository,
        process_controller,
        transcript_repository,
        config.startup_timeout,
    ))
}

pub fn build_server_process_controller(
    config: &AppConfig,
) -> Result<Arc<dyn ServerProcessController>, ProvisionerDomainError> {
    let controller: Arc<dyn ServerProcessController> = match config.server_control {
        ServerControlMode::None => Arc::new(UnmanagedServerProcessControllerImpl),
        ServerControlMode::Systemctl => Arc::new(SystemctlServerProcessControllerImpl::new(
            ServerServiceName::new(config.service_name.clone())?,
            config.startup_timeout,
        )),
        ServerControlMode::PgCtl => {
            let data_directory = config
                .data_directory
                .clone()
                .ok_or(ProvisionerDomainError::MissingDataDirectory)?;
            let log_file = config
                .pg_ctl_log_path
                .clone()
                .unwrap_or_else(PgCtlServerProcessControllerImpl::default_log_file);
            Arc::new(PgCtlServerProcessControllerImpl::new(
                data_directory,
                log_file,
                config.startup_timeout,
            ))
        }
    };

    Ok(controller)
}
