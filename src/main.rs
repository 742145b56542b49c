use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use devdb_provisioner::{
    config::app_config::AppConfig,
    provisioner::{
        build_database_provisioning_command_service,
        interfaces::cli::{
            controllers::provisioner_cli_controller::{
                EXIT_INVALID_INPUT, ProvisionerCliController, exit_code_for, report_failure,
            },
            resources::provision_arguments_resource::ProvisionArgumentsResource,
        },
    },
};
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    // Logs go to stderr so stdout carries only progress lines or JSON.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("devdb_provisioner=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let arguments = ProvisionArgumentsResource::parse();
    if let Err(validation_error) = arguments.validate() {
        eprintln!("[failed] invalid arguments: {validation_error}");
        return ExitCode::from(EXIT_INVALID_INPUT);
    }

    let format = arguments.format;
    let config = arguments.into_config(AppConfig::from_env());

    tracing::debug!(
        endpoint = %format!("{}:{}", config.postgres_host, config.postgres_port),
        server_control = config.server_control.as_str(),
        "configuration loaded"
    );

    let command_service = match build_database_provisioning_command_service(&config) {
        Ok(command_service) => command_service,
        Err(error) => {
            report_failure(&error, format);
            return ExitCode::from(exit_code_for(&error));
        }
    };

    let controller = ProvisionerCliController::new(Arc::new(command_service));
    ExitCode::from(controller.provision(&config, format).await)
}
