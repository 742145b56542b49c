use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::time::{Instant, sleep, timeout_at};

use crate::provisioner::{
    domain::{
        model::{
            commands::provision_database_command::ProvisionDatabaseCommand,
            entities::{
                authorization_grant_report::AuthorizationGrantReport,
                provisioning_result::ProvisioningResult,
            },
            enums::{
                catalog_change::CatalogChange,
                database_provisioning_outcome::DatabaseProvisioningOutcome,
                endpoint_reachability::EndpointReachability,
                provisioner_domain_error::ProvisionerDomainError,
                provisioning_step::ProvisioningStep,
            },
            events::provisioning_step_completed_event::ProvisioningStepCompletedEvent,
        },
        services::{
            database_provisioning_command_service::DatabaseProvisioningCommandService,
            provisioning_step_listener::ProvisioningStepListener,
        },
    },
    infrastructure::{
        persistence::repositories::{
            database_server_administration_repository::DatabaseServerAdministrationRepository,
            provisioning_transcript_repository::{
                ProvisioningTranscriptRepository, TranscriptEntryRecord,
            },
        },
        process::server_process_controller::ServerProcessController,
    },
};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct DatabaseProvisioningCommandServiceImpl {
    administration_repository: Arc<dyn DatabaseServerAdministrationRepository>,
    process_controller: Arc<dyn ServerProcessController>,
    transcript_repository: Arc<dyn ProvisioningTranscriptRepository>,
    startup_timeout: Duration,
    poll_interval: Duration,
}

impl DatabaseProvisioningCommandServiceImpl {
    pub fn new(
        administration_repository: Arc<dyn DatabaseServerAdministrationRepository>,
        process_controller: Arc<dyn ServerProcessController>,
        transcript_repository: Arc<dyn ProvisioningTranscriptRepository>,
        startup_timeout: Duration,
    ) -> Self {
        Self {
            administration_repository,
            process_controller,
            transcript_repository,
            startup_timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    async fn provision(
        &self,
        command: &ProvisionDatabaseCommand,
        listener: &dyn ProvisioningStepListener,
    ) -> Result<ProvisioningResult, ProvisionerDomainError> {
        let reachability = self.ensure_reachable(command).await?;
        self.record_step(ProvisioningStep::Reachability, reachability.as_str(), listener)
            .await;
        tracing::info!(
            endpoint = %command.endpoint(),
            outcome = reachability.as_str(),
            "database server reachable"
        );

        let database = self
            .ensure_database(command)
            .await
            .map_err(|error| ProvisionerDomainError::CreateFailed(error.reason()))?;
        self.record_step(ProvisioningStep::DatabaseCreation, database.as_str(), listener)
            .await;
        tracing::info!(
            database = command.database_name().value(),
            outcome = database.as_str(),
            "database ensured"
        );

        let authorization = self
            .ensure_authorization(command)
            .await
            .map_err(|error| ProvisionerDomainError::GrantFailed(error.reason()))?;
        self.record_step(
            ProvisioningStep::AuthorizationGrant,
            authorization.outcome().as_str(),
            listener,
        )
        .await;
        tracing::info!(
            database = command.database_name().value(),
            principal = command.principal().value(),
            owner_role = command.owner_role().value(),
            outcome = authorization.outcome().as_str(),
            "owner authorization ensured"
        );

        Ok(ProvisioningResult::new(
            command.endpoint().clone(),
            command.database_name().clone(),
            command.principal().clone(),
            command.owner_role().clone(),
            reachability,
            database,
            authorization,
            Utc::now(),
        ))
    }

    async fn ensure_reachable(
        &self,
        command: &ProvisionDatabaseCommand,
    ) -> Result<EndpointReachability, ProvisionerDomainError> {
        let ping_error = match self.administration_repository.ping().await {
            Ok(()) => return Ok(EndpointReachability::AlreadyRunning),
            Err(error) => error,
        };

        tracing::info!(
            endpoint = %command.endpoint(),
            controller = %self.process_controller.describe(),
            error = %ping_error.reason(),
            "database server not reachable; checking server process"
        );

        let unreachable = |error: ProvisionerDomainError| {
            ProvisionerDomainError::EndpointUnreachable(format!(
                "{} ({}): {}",
                command.endpoint(),
                self.process_controller.describe(),
                error.reason()
            ))
        };

        // Starting and waiting share one budget.
        let deadline = Instant::now() + self.startup_timeout;

        let running = self.process_controller.is_running().await.map_err(unreachable)?;
        if !running {
            let remaining = deadline.saturating_duration_since(Instant::now());
            self.process_controller
                .start(remaining)
                .await
                .map_err(unreachable)?;
        }

        self.wait_until_reachable(deadline)
            .await
            .map_err(unreachable)?;

        if running {
            Ok(EndpointReachability::AlreadyRunning)
        } else {
            Ok(EndpointReachability::Started)
        }
    }

    async fn wait_until_reachable(&self, deadline: Instant) -> Result<(), ProvisionerDomainError> {
        loop {
            // A start that used the whole budget still gets one ping.
            let attempt_deadline = deadline.max(Instant::now() + self.poll_interval);
            let last_error = match timeout_at(
                attempt_deadline,
                self.administration_repository.ping(),
            )
            .await
            {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(error)) => error.reason(),
                Err(_) => "connection attempt timed out".to_string(),
            };

            if Instant::now() >= deadline {
                return Err(ProvisionerDomainError::InfrastructureError(format!(
                    "not accepting connections after {}ms: {last_error}",
                    self.startup_timeout.as_millis()
                )));
            }

            sleep(
                self.poll_interval
                    .min(deadline.saturating_duration_since(Instant::now())),
            )
            .await;
        }
    }

    async fn ensure_database(
        &self,
        command: &ProvisionDatabaseCommand,
    ) -> Result<DatabaseProvisioningOutcome, ProvisionerDomainError> {
        let repository = &self.administration_repository;

        if repository.database_exists(command.database_name()).await? {
            return Ok(DatabaseProvisioningOutcome::AlreadyExists);
        }

        match repository.create_database(command.database_name()).await? {
            CatalogChange::Applied => Ok(DatabaseProvisioningOutcome::Created),
            CatalogChange::AlreadyPresent => Ok(DatabaseProvisioningOutcome::AlreadyExists),
        }
    }

    async fn ensure_authorization(
        &self,
        command: &ProvisionDatabaseCommand,
    ) -> Result<AuthorizationGrantReport, ProvisionerDomainError> {
        let repository = &self.administration_repository;
        let database_name = command.database_name();

        repository.acquire_authorization_lock(database_name).await?;
        let report = self.grant_owner_access(command).await;

        if let Err(error) = repository.release_authorization_lock(database_name).await {
            tracing::warn!(
                database = database_name.value(),
                error = %error,
                "failed to release authorization lock"
            );
        }

        report
    }

    /// Ownership moves before the CONNECT grant: transferring ownership
    /// rewrites the previous owner's ACL entry, which would otherwise carry
    /// away a grant made to the admin role itself.
    async fn grant_owner_access(
        &self,
        command: &ProvisionDatabaseCommand,
    ) -> Result<AuthorizationGrantReport, ProvisionerDomainError> {
        let repository = &self.administration_repository;
        let database_name = command.database_name();
        let principal = command.principal();
        let owner_role = command.owner_role();

        let login = if repository.login_exists(principal).await? {
            CatalogChange::AlreadyPresent
        } else {
            repository.create_login(principal).await?
        };

        let owner_role_change = if repository.owner_role_exists(owner_role).await? {
            CatalogChange::AlreadyPresent
        } else {
            repository.create_owner_role(owner_role).await?
        };

        let database_ownership = if repository
            .database_owned_by(database_name, owner_role)
            .await?
        {
            CatalogChange::AlreadyPresent
        } else {
            repository
                .transfer_database_ownership(database_name, owner_role)
                .await?
        };

        let database_user = if repository
            .database_user_exists(database_name, principal)
            .await?
        {
            CatalogChange::AlreadyPresent
        } else {
            repository
                .create_database_user(database_name, principal)
                .await?
        };

        let role_membership = if repository
            .role_membership_exists(owner_role, principal)
            .await?
        {
            CatalogChange::AlreadyPresent
        } else {
            repository
                .grant_role_membership(owner_role, principal)
                .await?
        };

        Ok(AuthorizationGrantReport {
            login,
            database_user,
            owner_role: owner_role_change,
            database_ownership,
            role_membership,
        })
    }

    async fn record_step(
        &self,
        step: ProvisioningStep,
        outcome: &str,
        listener: &dyn ProvisioningStepListener,
    ) {
        let event = ProvisioningStepCompletedEvent::new(step, outcome, Utc::now());
        listener.on_step_completed(&event);
        self.record_event(event.summary(), event.occurred_at).await;
    }

    async fn record_event(&self, text: String, occurred_at: DateTime<Utc>) {
        if let Err(error) = self
            .transcript_repository
            .save_entry(&TranscriptEntryRecord::event(text, occurred_at))
            .await
        {
            tracing::warn!(error = %error, "failed to write transcript entry");
        }
    }
}

#[async_trait]
impl DatabaseProvisioningCommandService for DatabaseProvisioningCommandServiceImpl {
    async fn handle_provision_reporting(
        &self,
        command: ProvisionDatabaseCommand,
        listener: &dyn ProvisioningStepListener,
    ) -> Result<ProvisioningResult, ProvisionerDomainError> {
        let started = format!(
            "provision started endpoint={} database={} principal={}",
            command.endpoint(),
            command.database_name().value(),
            command.principal().value()
        );
        self.record_event(started, Utc::now()).await;

        let result = match self.administration_repository.open(command.endpoint()).await {
            Ok(()) => self.provision(&command, listener).await,
            Err(error) => Err(ProvisionerDomainError::EndpointUnreachable(error.reason())),
        };

        self.administration_repository.close().await;

        match &result {
            Ok(_) => {
                self.record_event("provision succeeded".to_string(), Utc::now())
                    .await
            }
            Err(error) => {
                tracing::error!(error = %error, "provisioning failed");
                self.record_event(format!("provision failed {error}"), Utc::now())
                    .await;
            }
        }

        result
    }
}
