use std::{str::FromStr, sync::Arc, sync::Mutex, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::{
    config::app_config::AppConfig,
    provisioner::{
        domain::model::{
            enums::{catalog_change::CatalogChange, provisioner_domain_error::ProvisionerDomainError},
            value_objects::{
                owner_role_name::OwnerRoleName, principal_name::PrincipalName,
                provisioned_database_name::ProvisionedDatabaseName,
                server_endpoint::ServerEndpoint,
            },
        },
        infrastructure::persistence::repositories::{
            database_server_administration_repository::DatabaseServerAdministrationRepository,
            postgres::sql_identifier::quote_identifier,
            provisioning_transcript_repository::{
                ProvisioningTranscriptRepository, TranscriptEntryRecord,
            },
        },
    },
};

const DUPLICATE_DATABASE: &str = "42P04";
const DUPLICATE_OBJECT: &str = "42710";
const UNIQUE_VIOLATION: &str = "23505";
const AUTHORIZATION_LOCK_NAMESPACE: &str = "devdb-provisioner/authorization";

pub struct SqlxDatabaseServerAdministrationRepositoryImpl {
    admin_url: Option<String>,
    admin_user: String,
    admin_password: String,
    admin_database: String,
    acquire_timeout: Duration,
    pool: Mutex<Option<PgPool>>,
    transcript_repository: Arc<dyn ProvisioningTranscriptRepository>,
}

impl SqlxDatabaseServerAdministrationRepositoryImpl {
    pub fn new(
        config: &AppConfig,
        transcript_repository: Arc<dyn ProvisioningTranscriptRepository>,
    ) -> Self {
        Self {
            admin_url: config.postgres_admin_url.clone(),
            admin_user: config.postgres_user.clone(),
            admin_password: config.postgres_password.clone(),
            admin_database: config.postgres_admin_database.clone(),
            acquire_timeout: config.connect_timeout,
            pool: Mutex::new(None),
            transcript_repository,
        }
    }

    fn pool(&self) -> Result<PgPool, ProvisionerDomainError> {
        self.pool
            .lock()
            .map_err(|_| {
                ProvisionerDomainError::InfrastructureError("connection state poisoned".to_string())
            })?
            .clone()
            .ok_or_else(|| {
                ProvisionerDomainError::InfrastructureError(
                    "connection was not opened".to_string(),
                )
            })
    }

    fn connect_options(
        &self,
        endpoint: &ServerEndpoint,
    ) -> Result<PgConnectOptions, ProvisionerDomainError> {
        let options = match &self.admin_url {
            Some(url) => PgConnectOptions::from_str(url).map_err(map_infra_error)?,
            None => {
                let options = PgConnectOptions::new()
                    .username(&self.admin_user)
                    .database(&self.admin_database);
                if self.admin_password.is_empty() {
                    options
                } else {
                    options.password(&self.admin_password)
                }
            }
        };

        Ok(options.host(endpoint.host()).port(endpoint.port()))
    }

    async fn run_lock_statement(
        &self,
        statement: &str,
        database_name: &ProvisionedDatabaseName,
    ) -> Result<(), ProvisionerDomainError> {
        let pool = self.pool()?;
        let key = format!("{AUTHORIZATION_LOCK_NAMESPACE}/{}", database_name.value());
        self.record(statement, &[key.as_str()]).await;

        sqlx::query(statement)
            .bind(key.as_str())
            .execute(&pool)
            .await
            .map_err(map_infra_error)?;

        Ok(())
    }

    async fn record(&self, statement: &str, parameters: &[&str]) {
        let compact = statement.split_whitespace().collect::<Vec<_>>().join(" ");
        let text = if parameters.is_empty() {
            compact
        } else {
            format!("{compact} -- params: {}", parameters.join(", "))
        };

        if let Err(error) = self
            .transcript_repository
            .save_entry(&TranscriptEntryRecord::statement(text, Utc::now()))
            .await
        {
            tracing::warn!(error = %error, "failed to write transcript entry");
        }
    }

    async fn fetch_flag(
        &self,
        statement: &str,
        parameters: &[&str],
    ) -> Result<bool, ProvisionerDomainError> {
        let pool = self.pool()?;
        self.record(statement, parameters).await;

        let mut query = sqlx::query_scalar::<_, bool>(statement);
        for parameter in parameters {
            query = query.bind(*parameter);
        }

        query.fetch_one(&pool).await.map_err(map_infra_error)
    }

    /// Runs a DDL statement, reporting duplicate-object rejections listed in
    /// `duplicate_codes` as `AlreadyPresent`.
    async fn run_ensure_statement(
        &self,
        statement: &str,
        duplicate_codes: &[&str],
    ) -> Result<CatalogChange, ProvisionerDomainError> {
        let pool = self.pool()?;
        self.record(statement, &[]).await;

        match sqlx::query(statement).execute(&pool).await {
            Ok(_) => Ok(CatalogChange::Applied),
            Err(error) if has_sqlstate(&error, duplicate_codes) => {
                tracing::debug!(statement, "object created concurrently; treating as present");
                Ok(CatalogChange::AlreadyPresent)
            }
            Err(error) => Err(map_infra_error(error)),
        }
    }
}

#[async_trait]
impl DatabaseServerAdministrationRepository for SqlxDatabaseServerAdministrationRepositoryImpl {
    async fn open(&self, endpoint: &ServerEndpoint) -> Result<(), ProvisionerDomainError> {
        let options = self.connect_options(endpoint)?;

        // Session advisory locks live on the connection, so the single
        // connection must not be recycled mid-run.
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_lazy_with(options);

        let previous = self
            .pool
            .lock()
            .map_err(|_| {
                ProvisionerDomainError::InfrastructureError("connection state poisoned".to_string())
            })?
            .replace(pool);

        if let Some(previous) = previous {
            previous.close().await;
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), ProvisionerDomainError> {
        let pool = self.pool()?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(map_infra_error)?;

        Ok(())
    }

    async fn database_exists(
        &self,
        database_name: &ProvisionedDatabaseName,
    ) -> Result<bool, ProvisionerDomainError> {
        let statement = r#"
            SELECT EXISTS(
                SELECT 1
                FROM pg_database
                WHERE datname = $1
            ) AS database_exists
        "#;

        self.fetch_flag(statement, &[database_name.value()]).await
    }

    async fn create_database(
        &self,
        database_name: &ProvisionedDatabaseName,
    ) -> Result<CatalogChange, ProvisionerDomainError> {
        self.run_ensure_statement(
            &format!("CREATE DATABASE {}", quote_identifier(database_name.value())),
            &[DUPLICATE_DATABASE, UNIQUE_VIOLATION],
        )
        .await
    }

    async fn acquire_authorization_lock(
        &self,
        database_name: &ProvisionedDatabaseName,
    ) -> Result<(), ProvisionerDomainError> {
        self.run_lock_statement("SELECT pg_advisory_lock(hashtext($1))", database_name)
            .await
    }

    async fn release_authorization_lock(
        &self,
        database_name: &ProvisionedDatabaseName,
    ) -> Result<(), ProvisionerDomainError> {
        self.run_lock_statement("SELECT pg_advisory_unlock(hashtext($1))", database_name)
            .await
    }

    async fn login_exists(&self, principal: &PrincipalName) -> Result<bool, ProvisionerDomainError> {
        let statement = r#"
            SELECT EXISTS(
                SELECT 1
                FROM pg_roles
                WHERE rolname = $1 AND rolcanlogin
            ) AS login_exists
        "#;

        self.fetch_flag(statement, &[principal.value()]).await
    }

    async fn create_login(
        &self,
        principal: &PrincipalName,
    ) -> Result<CatalogChange, ProvisionerDomainError> {
        let role = quote_identifier(principal.value());
        let change = self
            .run_ensure_statement(
                &format!("CREATE ROLE {role} LOGIN"),
                &[DUPLICATE_OBJECT, UNIQUE_VIOLATION],
            )
            .await?;

        if change == CatalogChange::Applied || self.login_exists(principal).await? {
            return Ok(change);
        }

        // The role predates us without the LOGIN attribute.
        self.run_ensure_statement(&format!("ALTER ROLE {role} LOGIN"), &[])
            .await
    }

    async fn database_user_exists(
        &self,
        database_name: &ProvisionedDatabaseName,
        principal: &PrincipalName,
    ) -> Result<bool, ProvisionerDomainError> {
        let statement = r#"
            SELECT EXISTS(
                SELECT 1
                FROM pg_database d
                CROSS JOIN LATERAL aclexplode(d.datacl) AS acl
                JOIN pg_roles r ON r.oid = acl.grantee
                WHERE d.datname = $1
                  AND r.rolname = $2
                  AND acl.privilege_type = 'CONNECT'
            ) AS user_exists
        "#;

        self.fetch_flag(statement, &[database_name.value(), principal.value()])
            .await
    }

    async fn create_database_user(
        &self,
        database_name: &ProvisionedDatabaseName,
        principal: &PrincipalName,
    ) -> Result<CatalogChange, ProvisionerDomainError> {
        self.run_ensure_statement(
            &format!(
                "GRANT CONNECT ON DATABASE {} TO {}",
                quote_identifier(database_name.value()),
                quote_identifier(principal.value())
            ),
            &[],
        )
        .await
    }

    async fn owner_role_exists(
        &self,
        owner_role: &OwnerRoleName,
    ) -> Result<bool, ProvisionerDomainError> {
        let statement = r#"
            SELECT EXISTS(
                SELECT 1
                FROM pg_roles
                WHERE rolname = $1
            ) AS role_exists
        "#;

        self.fetch_flag(statement, &[owner_role.value()]).await
    }

    async fn create_owner_role(
        &self,
        owner_role: &OwnerRoleName,
    ) -> Result<CatalogChange, ProvisionerDomainError> {
        self.run_ensure_statement(
            &format!("CREATE ROLE {} NOLOGIN", quote_identifier(owner_role.value())),
            &[DUPLICATE_OBJECT, UNIQUE_VIOLATION],
        )
        .await
    }

    async fn database_owned_by(
        &self,
        database_name: &ProvisionedDatabaseName,
        owner_role: &OwnerRoleName,
    ) -> Result<bool, ProvisionerDomainError> {
        let statement = r#"
            SELECT EXISTS(
                SELECT 1
                FROM pg_database d
                JOIN pg_roles r ON r.oid = d.datdba
                WHERE d.datname = $1 AND r.rolname = $2
            ) AS database_owned
        "#;

        self.fetch_flag(statement, &[database_name.value(), owner_role.value()])
            .await
    }

    async fn transfer_database_ownership(
        &self,
        database_name: &ProvisionedDatabaseName,
        owner_role: &OwnerRoleName,
    ) -> Result<CatalogChange, ProvisionerDomainError> {
        self.run_ensure_statement(
            &format!(
                "ALTER DATABASE {} OWNER TO {}",
                quote_identifier(database_name.value()),
                quote_identifier(owner_role.value())
            ),
            &[],
        )
        .await
    }

    async fn role_membership_exists(
        &self,
        owner_role: &OwnerRoleName,
        principal: &PrincipalName,
    ) -> Result<bool, ProvisionerDomainError> {
        let statement = r#"
            SELECT EXISTS(
                SELECT 1
                FROM pg_auth_members m
                JOIN pg_roles role ON role.oid = m.roleid
                JOIN pg_roles member ON member.oid = m.member
                WHERE role.rolname = $1 AND member.rolname = $2
            ) AS membership_exists
        "#;

        self.fetch_flag(statement, &[owner_role.value(), principal.value()])
            .await
    }

    async fn grant_role_membership(
        &self,
        owner_role: &OwnerRoleName,
        principal: &PrincipalName,
    ) -> Result<CatalogChange, ProvisionerDomainError> {
        self.run_ensure_statement(
            &format!(
                "GRANT {} TO {}",
                quote_identifier(owner_role.value()),
                quote_identifier(principal.value())
            ),
            &[UNIQUE_VIOLATION],
        )
        .await
    }

    async fn close(&self) {
        let pool = match self.pool.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        if let Some(pool) = pool {
            pool.close().await;
        }
    }
}

fn has_sqlstate(error: &sqlx::Error, codes: &[&str]) -> bool {
    if let sqlx::Error::Database(db_error) = error {
        return db_error
            .code()
            .as_deref()
            .is_some_and(|code| codes.contains(&code));
    }
    false
}

/// Keeps the server's own wording so operators see the real cause.
fn map_infra_error(error: sqlx::Error) -> ProvisionerDomainError {
    let message = match &error {
        sqlx::Error::Database(db_error) => db_error.message().to_string(),
        other => other.to_string(),
    };
    ProvisionerDomainError::InfrastructureError(message)
}
