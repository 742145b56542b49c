use devdb_provisioner::provisioner::domain::{
    model::enums::{
        authorization_grant_outcome::AuthorizationGrantOutcome, catalog_change::CatalogChange,
        database_provisioning_outcome::DatabaseProvisioningOutcome,
        endpoint_reachability::EndpointReachability,
        provisioner_domain_error::ProvisionerDomainError, provisioning_step::ProvisioningStep,
    },
    services::database_provisioning_command_service::DatabaseProvisioningCommandService,
};

use std::time::{Duration, Instant};

use crate::support::{
    FakeControllerMode, FakeDatabaseServer, RecordingStepListener, create_harness,
    create_harness_with_startup_timeout, provision_command,
};

#[tokio::test]
async fn handle_provision_starts_server_creates_database_and_grants_owner_access() {
    let harness = create_harness(
        FakeDatabaseServer::new().unreachable(),
        FakeControllerMode::StoppedStartable,
    );

    let result = harness
        .service
        .handle_provision(provision_command())
        .await
        .expect("provisioning should succeed");

    assert_eq!(result.reachability(), EndpointReachability::Started);
    assert_eq!(result.database(), DatabaseProvisioningOutcome::Created);
    assert_eq!(result.authorization(), AuthorizationGrantOutcome::Granted);
    assert_eq!(result.owner_role().value(), "webapp_development_owner");
    assert_eq!(harness.process_controller.stats(), (1, 1));
    assert_eq!(
        harness.server.ddl_statements(),
        vec![
            "CREATE DATABASE webapp_development".to_string(),
            "CREATE ROLE alice LOGIN".to_string(),
            "CREATE ROLE webapp_development_owner NOLOGIN".to_string(),
            "ALTER DATABASE webapp_development OWNER TO webapp_development_owner".to_string(),
            "GRANT CONNECT ON DATABASE webapp_development TO alice".to_string(),
            "GRANT webapp_development_owner TO alice".to_string(),
        ]
    );
    assert!(harness.server.is_member("webapp_development_owner", "alice"));
}

#[tokio::test]
async fn handle_provision_is_a_no_op_when_everything_is_in_place() {
    let harness = create_harness(
        FakeDatabaseServer::new().with_owner_access("webapp_development", "alice"),
        FakeControllerMode::Running,
    );

    let result = harness
        .service
        .handle_provision(provision_command())
        .await
        .expect("provisioning should succeed");

    assert_eq!(result.reachability(), EndpointReachability::AlreadyRunning);
    assert_eq!(result.database(), DatabaseProvisioningOutcome::AlreadyExists);
    assert_eq!(result.authorization(), AuthorizationGrantOutcome::AlreadyGranted);
    assert!(result.is_no_op());
    assert!(harness.server.ddl_statements().is_empty());
    assert_eq!(harness.process_controller.stats(), (0, 0));
}

#[tokio::test]
async fn handle_provision_stops_at_reachability_when_server_is_not_installed() {
    let harness = create_harness(
        FakeDatabaseServer::new().unreachable(),
        FakeControllerMode::NotInstalled,
    );

    let result = harness.service.handle_provision(provision_command()).await;

    match result {
        Err(error @ ProvisionerDomainError::EndpointUnreachable(_)) => {
            assert_eq!(error.failed_step(), Some(ProvisioningStep::Reachability));
            assert!(error.reason().contains("not found"));
        }
        other => panic!("expected EndpointUnreachable, got {other:?}"),
    }
    assert_eq!(harness.server.lookups(), 0);
    assert!(harness.server.ddl_statements().is_empty());
    assert_eq!(harness.process_controller.stats(), (1, 0));
}

#[tokio::test]
async fn handle_provision_reports_unreachable_when_start_fails() {
    let harness = create_harness(
        FakeDatabaseServer::new().unreachable(),
        FakeControllerMode::StoppedStartFails,
    );

    let result = harness.service.handle_provision(provision_command()).await;

    assert!(matches!(
        result,
        Err(ProvisionerDomainError::EndpointUnreachable(message)) if message.contains("could not start server")
    ));
    assert_eq!(harness.server.lookups(), 0);
}

#[tokio::test]
async fn handle_provision_gives_up_after_bounded_startup_wait() {
    let harness = create_harness(
        FakeDatabaseServer::new().unreachable(),
        FakeControllerMode::StoppedNeverReady,
    );

    let result = harness.service.handle_provision(provision_command()).await;

    assert!(matches!(
        result,
        Err(ProvisionerDomainError::EndpointUnreachable(message))
            if message.contains("not accepting connections") && message.contains("connection refused")
    ));
    assert_eq!(harness.process_controller.stats(), (1, 1));
    assert!(harness.server.ddl_statements().is_empty());
}

#[tokio::test]
async fn handle_provision_waits_without_starting_when_process_already_runs() {
    let harness = create_harness(
        FakeDatabaseServer::new().unreachable(),
        FakeControllerMode::Running,
    );

    let result = harness.service.handle_provision(provision_command()).await;

    assert!(matches!(
        result,
        Err(ProvisionerDomainError::EndpointUnreachable(_))
    ));
    assert_eq!(harness.process_controller.stats(), (1, 0));
}

#[tokio::test]
async fn handle_provision_surfaces_permission_denied_on_create() {
    let harness = create_harness(
        FakeDatabaseServer::new().fail_create_database("permission denied to create database"),
        FakeControllerMode::Running,
    );

    let result = harness.service.handle_provision(provision_command()).await;

    assert!(matches!(
        result,
        Err(ProvisionerDomainError::CreateFailed(message)) if message == "permission denied to create database"
    ));
    assert_eq!(
        harness.server.ddl_statements(),
        vec!["CREATE DATABASE webapp_development".to_string()]
    );
}

#[tokio::test]
async fn handle_provision_surfaces_grant_failure_verbatim() {
    let harness = create_harness(
        FakeDatabaseServer::new().fail_create_login("permission denied to create role"),
        FakeControllerMode::Running,
    );

    let result = harness.service.handle_provision(provision_command()).await;

    assert!(matches!(
        result,
        Err(ProvisionerDomainError::GrantFailed(message)) if message == "permission denied to create role"
    ));
    assert!(harness.server.has_database("webapp_development"));
    assert!(!harness.server.is_member("webapp_development_owner", "alice"));
    assert_eq!(harness.server.authorization_locks_held(), 0);
}

#[tokio::test]
async fn completed_steps_are_reported_before_a_later_step_fails() {
    let harness = create_harness(
        FakeDatabaseServer::new()
            .unreachable()
            .fail_create_login("permission denied to create role"),
        FakeControllerMode::StoppedStartable,
    );
    let listener = RecordingStepListener::new();

    let result = harness
        .service
        .handle_provision_reporting(provision_command(), &listener)
        .await;

    assert!(matches!(result, Err(ProvisionerDomainError::GrantFailed(_))));
    assert_eq!(
        listener.summaries(),
        vec![
            "reachability started".to_string(),
            "database_creation created".to_string(),
        ]
    );
}

#[tokio::test]
async fn start_and_readiness_wait_share_one_startup_budget() {
    let startup_timeout = Duration::from_millis(200);
    let harness = create_harness_with_startup_timeout(
        FakeDatabaseServer::new().unreachable(),
        FakeControllerMode::StoppedSlowStartNeverReady,
        startup_timeout,
    );

    let started_at = Instant::now();
    let result = harness.service.handle_provision(provision_command()).await;
    let elapsed = started_at.elapsed();

    assert!(matches!(
        result,
        Err(ProvisionerDomainError::EndpointUnreachable(message)) if message.contains("not accepting connections")
    ));
    assert!(elapsed >= startup_timeout);
    assert!(
        elapsed < startup_timeout + Duration::from_millis(150),
        "startup took {elapsed:?}"
    );
}

#[tokio::test]
async fn handle_provision_releases_connection_on_success_and_failure() {
    let succeeding = create_harness(FakeDatabaseServer::new(), FakeControllerMode::Running);
    let failing = create_harness(
        FakeDatabaseServer::new().unreachable(),
        FakeControllerMode::NotInstalled,
    );

    let _ = succeeding.service.handle_provision(provision_command()).await;
    let _ = failing.service.handle_provision(provision_command()).await;

    assert_eq!(succeeding.server.open_calls(), 1);
    assert_eq!(succeeding.server.close_calls(), 1);
    assert_eq!(failing.server.open_calls(), 1);
    assert_eq!(failing.server.close_calls(), 1);
}

#[tokio::test]
async fn handle_provision_reports_partial_grant_detail() {
    let harness = create_harness(
        FakeDatabaseServer::new()
            .with_database("webapp_development")
            .with_login("alice"),
        FakeControllerMode::Running,
    );

    let result = harness
        .service
        .handle_provision(provision_command())
        .await
        .expect("provisioning should succeed");

    let report = result.authorization_report();
    assert_eq!(result.database(), DatabaseProvisioningOutcome::AlreadyExists);
    assert_eq!(report.login, CatalogChange::AlreadyPresent);
    assert_eq!(report.database_user, CatalogChange::Applied);
    assert_eq!(report.role_membership, CatalogChange::Applied);
    assert_eq!(result.authorization(), AuthorizationGrantOutcome::Granted);
}
