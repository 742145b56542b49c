use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use devdb_provisioner::{
    config::app_config::ServerControlMode,
    provisioner::{
        build_server_process_controller,
        domain::{
            model::enums::provisioner_domain_error::ProvisionerDomainError,
            services::database_provisioning_command_service::DatabaseProvisioningCommandService,
        },
        interfaces::cli::{
            controllers::provisioner_cli_controller::{
                EXIT_INVALID_INPUT, EXIT_PROVISIONING_FAILED, EXIT_SUCCESS, ProvisionerCliController,
                exit_code_for,
            },
            listeners::console_provisioning_step_listener::ConsoleProvisioningStepListener,
            resources::{
                failure_report_resource::FailureReportResource,
                provision_arguments_resource::{OutputFormatResource, ProvisionArgumentsResource},
                provisioning_result_resource::ProvisioningResultResource,
            },
        },
    },
};
use validator::Validate;

use crate::support::{
    FakeControllerMode, FakeDatabaseServer, create_harness, provision_command, test_config,
};

#[test]
fn arguments_override_environment_defaults() {
    let arguments = ProvisionArgumentsResource::try_parse_from([
        "devdb-provisioner",
        "--database",
        "shop_dev",
        "--principal",
        "bob",
        "--server-control",
        "pg_ctl",
        "--data-dir",
        "/var/lib/postgresql/data",
        "--startup-timeout-secs",
        "30",
    ])
    .expect("arguments should parse");

    assert!(arguments.validate().is_ok());
    let config = arguments.into_config(test_config());

    assert_eq!(config.database_name, "shop_dev");
    assert_eq!(config.principal, "bob");
    assert_eq!(config.server_control, ServerControlMode::PgCtl);
    assert_eq!(
        config.data_directory,
        Some(PathBuf::from("/var/lib/postgresql/data"))
    );
    assert_eq!(config.startup_timeout, Duration::from_secs(30));
    assert_eq!(config.postgres_host, "127.0.0.1");
    assert_eq!(config.postgres_user, "postgres");
}

#[test]
fn arguments_without_flags_keep_base_config() {
    let arguments =
        ProvisionArgumentsResource::try_parse_from(["devdb-provisioner"]).expect("parses");

    assert_eq!(arguments.format, OutputFormatResource::Text);
    let config = arguments.into_config(test_config());

    assert_eq!(config.database_name, "webapp_development");
    assert_eq!(config.server_control, ServerControlMode::None);
}

#[test]
fn empty_database_argument_fails_validation() {
    let arguments =
        ProvisionArgumentsResource::try_parse_from(["devdb-provisioner", "--database", ""])
            .expect("parses");

    assert!(arguments.validate().is_err());
}

#[test]
fn server_control_mode_parses_aliases() {
    assert_eq!(
        "systemd".parse::<ServerControlMode>(),
        Ok(ServerControlMode::Systemctl)
    );
    assert_eq!(
        "PG_CTL".parse::<ServerControlMode>(),
        Ok(ServerControlMode::PgCtl)
    );
    assert_eq!("".parse::<ServerControlMode>(), Ok(ServerControlMode::None));
    assert_eq!("launchd".parse::<ServerControlMode>(), Err(()));
}

#[test]
fn pg_ctl_control_requires_data_directory() {
    let mut config = test_config();
    config.server_control = ServerControlMode::PgCtl;

    assert!(matches!(
        build_server_process_controller(&config),
        Err(ProvisionerDomainError::MissingDataDirectory)
    ));
}

#[test]
fn systemctl_control_validates_service_name() {
    let mut config = test_config();
    config.server_control = ServerControlMode::Systemctl;
    config.service_name = "postgresql && reboot".to_string();

    assert!(matches!(
        build_server_process_controller(&config),
        Err(ProvisionerDomainError::InvalidServiceName)
    ));
}

#[test]
fn failure_report_suggests_installing_server_when_tooling_is_missing() {
    let error = ProvisionerDomainError::EndpointUnreachable(
        "127.0.0.1:5432 (pg_ctl cluster at /data): pg_ctl not found; is the server tooling installed?"
            .to_string(),
    );

    let report = FailureReportResource::from_error(&error);

    assert_eq!(report.step.as_deref(), Some("reachability"));
    assert!(
        report
            .remediation
            .as_deref()
            .is_some_and(|hint| hint.starts_with("server not installed"))
    );
    assert_eq!(exit_code_for(&error), EXIT_PROVISIONING_FAILED);
}

#[test]
fn failure_report_explains_missing_create_privilege() {
    let error =
        ProvisionerDomainError::CreateFailed("permission denied to create database".to_string());

    let report = FailureReportResource::from_error(&error);
    let lines = report.render_text();

    assert_eq!(
        lines[0],
        "[failed] database_creation: database creation failed: permission denied to create database"
    );
    assert!(lines[1].contains("CREATEDB"));
}

#[test]
fn failure_report_explains_missing_role_privilege() {
    let error = ProvisionerDomainError::GrantFailed("permission denied to create role".to_string());

    let report = FailureReportResource::from_error(&error);

    assert_eq!(report.step.as_deref(), Some("authorization_grant"));
    assert!(
        report
            .remediation
            .as_deref()
            .is_some_and(|hint| hint.contains("insufficient privilege to create login"))
    );
}

#[test]
fn invalid_input_maps_to_distinct_exit_code() {
    assert_eq!(
        exit_code_for(&ProvisionerDomainError::InvalidPrincipalName),
        EXIT_INVALID_INPUT
    );
}

#[tokio::test]
async fn result_resource_serializes_outcomes() {
    let harness = create_harness(FakeDatabaseServer::new(), FakeControllerMode::Running);
    let result = harness
        .service
        .handle_provision(provision_command())
        .await
        .expect("provisioning should succeed");

    let resource = ProvisioningResultResource::from(&result);
    let json = serde_json::to_value(&resource).expect("serializable");

    assert_eq!(json["endpoint"], "127.0.0.1:5432");
    assert_eq!(json["reachability"], "already_running");
    assert_eq!(json["database"], "created");
    assert_eq!(json["authorization"], "granted");
    assert_eq!(json["authorization_detail"]["role_membership"], "applied");
    assert_eq!(json["changed"], true);
    assert_eq!(
        resource.render_text()[1],
        "database webapp_development on 127.0.0.1:5432 is ready (changes applied)"
    );
}

#[tokio::test]
async fn controller_returns_success_exit_code() {
    let harness = create_harness(FakeDatabaseServer::new(), FakeControllerMode::Running);
    let controller = ProvisionerCliController::new(Arc::new(harness.service));

    let exit_code = controller
        .provision(&test_config(), OutputFormatResource::Json)
        .await;

    assert_eq!(exit_code, EXIT_SUCCESS);
    assert!(harness.server.has_database("webapp_development"));
}

#[tokio::test]
async fn controller_returns_failure_exit_code_when_unreachable() {
    let harness = create_harness(
        FakeDatabaseServer::new().unreachable(),
        FakeControllerMode::NotInstalled,
    );
    let controller = ProvisionerCliController::new(Arc::new(harness.service));

    let exit_code = controller
        .provision(&test_config(), OutputFormatResource::Text)
        .await;

    assert_eq!(exit_code, EXIT_PROVISIONING_FAILED);
}

#[tokio::test]
async fn controller_rejects_invalid_principal_before_touching_the_server() {
    let harness = create_harness(FakeDatabaseServer::new(), FakeControllerMode::Running);
    let server = harness.server.clone();
    let controller = ProvisionerCliController::new(Arc::new(harness.service));
    let mut config = test_config();
    config.principal = String::new();

    let exit_code = controller.provision(&config, OutputFormatResource::Text).await;

    assert_eq!(exit_code, EXIT_INVALID_INPUT);
    assert_eq!(server.open_calls(), 0);
}

#[tokio::test]
async fn failure_report_keeps_steps_completed_before_the_failure() {
    let harness = create_harness(
        FakeDatabaseServer::new().fail_create_login("permission denied to create role"),
        FakeControllerMode::Running,
    );
    let listener = ConsoleProvisioningStepListener::new(OutputFormatResource::Json);

    let error = harness
        .service
        .handle_provision_reporting(provision_command(), &listener)
        .await
        .expect_err("grant should fail");
    let report =
        FailureReportResource::from_error(&error).with_completed_steps(listener.completed_steps());
    let json = serde_json::to_value(&report).expect("serializable");

    assert_eq!(report.step.as_deref(), Some("authorization_grant"));
    assert_eq!(json["completed_steps"][0]["step"], "reachability");
    assert_eq!(json["completed_steps"][0]["outcome"], "already_running");
    assert_eq!(json["completed_steps"][1]["step"], "database_creation");
    assert_eq!(json["completed_steps"][1]["outcome"], "created");
}
