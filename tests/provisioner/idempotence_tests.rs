use devdb_provisioner::provisioner::domain::{
    model::enums::{
        authorization_grant_outcome::AuthorizationGrantOutcome, catalog_change::CatalogChange,
        database_provisioning_outcome::DatabaseProvisioningOutcome,
    },
    services::database_provisioning_command_service::DatabaseProvisioningCommandService,
};

use crate::support::{
    FAKE_ADMIN_ROLE, FakeControllerMode, FakeDatabaseServer, create_harness, provision_command,
    provision_command_for,
};

#[tokio::test]
async fn second_run_reports_already_exists_and_issues_no_ddl() {
    let harness = create_harness(FakeDatabaseServer::new(), FakeControllerMode::Running);

    let first = harness
        .service
        .handle_provision(provision_command())
        .await
        .expect("first run should succeed");
    let statements_after_first = harness.server.ddl_statements();

    let second = harness
        .service
        .handle_provision(provision_command())
        .await
        .expect("second run should succeed");

    assert_eq!(first.database(), DatabaseProvisioningOutcome::Created);
    assert_eq!(first.authorization(), AuthorizationGrantOutcome::Granted);
    assert_eq!(second.database(), DatabaseProvisioningOutcome::AlreadyExists);
    assert_eq!(second.authorization(), AuthorizationGrantOutcome::AlreadyGranted);
    assert!(second.is_no_op());
    assert_eq!(harness.server.ddl_statements(), statements_after_first);
}

#[tokio::test]
async fn repeated_runs_stay_stable() {
    let harness = create_harness(FakeDatabaseServer::new(), FakeControllerMode::Running);

    for _ in 0..5 {
        harness
            .service
            .handle_provision(provision_command())
            .await
            .expect("run should succeed");
    }

    assert_eq!(harness.server.ddl_statements().len(), 6);
}

#[tokio::test]
async fn database_name_is_normalized_before_lookup() {
    let harness = create_harness(
        FakeDatabaseServer::new().with_owner_access("webapp_development", "alice"),
        FakeControllerMode::Running,
    );

    let result = harness
        .service
        .handle_provision(provision_command_for("  WebApp_Development ", "alice"))
        .await
        .expect("provisioning should succeed");

    assert!(result.is_no_op());
}

#[tokio::test]
async fn second_principal_is_added_without_disturbing_the_first() {
    let harness = create_harness(
        FakeDatabaseServer::new().with_owner_access("webapp_development", "alice"),
        FakeControllerMode::Running,
    );

    let result = harness
        .service
        .handle_provision(provision_command_for("webapp_development", "bob"))
        .await
        .expect("provisioning should succeed");

    let report = result.authorization_report();
    assert_eq!(report.owner_role, CatalogChange::AlreadyPresent);
    assert_eq!(report.database_ownership, CatalogChange::AlreadyPresent);
    assert_eq!(report.role_membership, CatalogChange::Applied);
    assert!(harness.server.is_member("webapp_development_owner", "alice"));
    assert!(harness.server.is_member("webapp_development_owner", "bob"));
}

#[tokio::test]
async fn existing_role_without_login_is_upgraded_in_place() {
    let harness = create_harness(
        FakeDatabaseServer::new().with_role_without_login("alice"),
        FakeControllerMode::Running,
    );

    let result = harness
        .service
        .handle_provision(provision_command())
        .await
        .expect("provisioning should succeed");

    assert_eq!(result.authorization_report().login, CatalogChange::Applied);
    assert_eq!(result.authorization(), AuthorizationGrantOutcome::Granted);
    assert!(
        harness
            .server
            .ddl_statements()
            .contains(&"ALTER ROLE alice LOGIN".to_string())
    );
}

#[tokio::test]
async fn admin_principal_keeps_connect_grant_across_ownership_transfer() {
    let harness = create_harness(FakeDatabaseServer::new(), FakeControllerMode::Running);

    let first = harness
        .service
        .handle_provision(provision_command_for("webapp_development", FAKE_ADMIN_ROLE))
        .await
        .expect("first run should succeed");
    let second = harness
        .service
        .handle_provision(provision_command_for("webapp_development", FAKE_ADMIN_ROLE))
        .await
        .expect("second run should succeed");

    assert_eq!(first.authorization(), AuthorizationGrantOutcome::Granted);
    assert_eq!(
        second.authorization_report().database_user,
        CatalogChange::AlreadyPresent
    );
    assert!(second.is_no_op());
    assert!(
        harness
            .server
            .has_connect_grant("webapp_development", FAKE_ADMIN_ROLE)
    );
}
