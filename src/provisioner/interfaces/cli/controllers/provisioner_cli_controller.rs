use std::sync::Arc;

use crate::{
    config::app_config::AppConfig,
    provisioner::{
        domain::{
            model::{
                commands::provision_database_command::ProvisionDatabaseCommand,
                enums::provisioner_domain_error::ProvisionerDomainError,
            },
            services::database_provisioning_command_service::DatabaseProvisioningCommandService,
        },
        interfaces::cli::{
            listeners::console_provisioning_step_listener::ConsoleProvisioningStepListener,
            resources::{
                failure_report_resource::FailureReportResource,
                provision_arguments_resource::OutputFormatResource,
                provisioning_result_resource::ProvisioningResultResource,
            },
        },
    },
};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_PROVISIONING_FAILED: u8 = 1;
pub const EXIT_INVALID_INPUT: u8 = 2;

pub struct ProvisionerCliController {
    command_service: Arc<dyn DatabaseProvisioningCommandService>,
}

impl ProvisionerCliController {
    pub fn new(command_service: Arc<dyn DatabaseProvisioningCommandService>) -> Self {
        Self { command_service }
    }

    /// Runs one provisioning pass and returns the process exit code.
    pub async fn provision(&self, config: &AppConfig, format: OutputFormatResource) -> u8 {
        let command = match ProvisionDatabaseCommand::new(
            config.postgres_host.clone(),
            config.postgres_port,
            config.database_name.clone(),
            config.principal.clone(),
        ) {
            Ok(command) => command,
            Err(error) => {
                report_failure(&error, format);
                return exit_code_for(&error);
            }
        };

        let listener = ConsoleProvisioningStepListener::new(format);

        if format == OutputFormatResource::Text {
            println!(
                "Provisioning database '{}' for '{}' on {}",
                command.database_name().value(),
                command.principal().value(),
                command.endpoint()
            );
        }

        match self
            .command_service
            .handle_provision_reporting(command, &listener)
            .await
        {
            Ok(result) => {
                let resource = ProvisioningResultResource::from(&result);
                match format {
                    OutputFormatResource::Text => {
                        for line in resource.render_text() {
                            println!("{line}");
                        }
                    }
                    OutputFormatResource::Json => match serde_json::to_string_pretty(&resource) {
                        Ok(json) => println!("{json}"),
                        Err(error) => eprintln!("failed to render result: {error}"),
                    },
                }
                EXIT_SUCCESS
            }
            Err(error) => {
                let report = FailureReportResource::from_error(&error)
                    .with_completed_steps(listener.completed_steps());
                print_failure_report(&report, &error, format);
                exit_code_for(&error)
            }
        }
    }
}

pub fn exit_code_for(error: &ProvisionerDomainError) -> u8 {
    if error.is_invalid_input() {
        EXIT_INVALID_INPUT
    } else {
        EXIT_PROVISIONING_FAILED
    }
}

pub fn report_failure(error: &ProvisionerDomainError, format: OutputFormatResource) {
    print_failure_report(&FailureReportResource::from_error(error), error, format);
}

/// Completed steps are not repeated in text mode; their progress lines are
/// already on stdout.
fn print_failure_report(
    report: &FailureReportResource,
    error: &ProvisionerDomainError,
    format: OutputFormatResource,
) {
    match format {
        OutputFormatResource::Text => {
            for line in report.render_text() {
                eprintln!("{line}");
            }
        }
        OutputFormatResource::Json => match serde_json::to_string_pretty(report) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{error}"),
        },
    }
}
