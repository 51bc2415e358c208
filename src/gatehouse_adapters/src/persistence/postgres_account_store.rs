use chrono::{DateTime, Utc};
use gatehouse_core::{
    Account, AccountId, AccountStore, AccountStoreError, ActivationCode, CodeConsumption,
    CodeLookup, CodeValidationOutcome, CredentialHash, Email, PendingCode, ProfileUpdate,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, migrate::Migrator};
use uuid::Uuid;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const ACCOUNT_COLUMNS: &str = "id, email, display_name, phone, address, image, password_hash, \
     is_active, pending_code, pending_code_expires_at, created_at";

#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresAccountStore { pool }
    }

    /// Applies the bundled schema migrations.
    pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.run(pool).await
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    display_name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    image: Option<String>,
    password_hash: String,
    is_active: bool,
    pending_code: Option<String>,
    pending_code_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountStoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::try_from(Secret::new(row.email))
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let pending_code = match (row.pending_code, row.pending_code_expires_at) {
            (Some(code), Some(expires_at)) => Some(PendingCode {
                code: ActivationCode::parse(code)
                    .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?,
                expires_at,
            }),
            _ => None,
        };

        Ok(Account {
            id: AccountId::from(row.id),
            email,
            display_name: row.display_name,
            phone: row.phone,
            address: row.address,
            image: row.image,
            credential_hash: CredentialHash::new(Secret::new(row.password_hash)),
            is_active: row.is_active,
            pending_code,
            created_at: row.created_at,
        })
    }
}

fn unexpected(e: sqlx::Error) -> AccountStoreError {
    AccountStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Retrieving account by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1");
        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(name = "Retrieving account by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");
        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(Account::try_from).transpose()
    }

    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn insert(&self, account: Account) -> Result<Account, AccountStoreError> {
        let (pending_code, pending_code_expires_at) = match &account.pending_code {
            Some(pending) => (Some(pending.code.as_str()), Some(pending.expires_at)),
            None => (None, None),
        };

        sqlx::query(
            r#"
                INSERT INTO accounts (
                    id, email, display_name, phone, address, image, password_hash,
                    is_active, pending_code, pending_code_expires_at, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(account.email.as_ref().expose_secret())
        .bind(&account.display_name)
        .bind(&account.phone)
        .bind(&account.address)
        .bind(&account.image)
        .bind(account.credential_hash.as_ref().expose_secret())
        .bind(account.is_active)
        .bind(pending_code)
        .bind(pending_code_expires_at)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountStoreError::AccountAlreadyExists;
                }
            }
            unexpected(e)
        })?;

        Ok(account)
    }

    #[tracing::instrument(name = "Storing pending code in PostgreSQL", skip_all)]
    async fn set_pending_code(
        &self,
        id: &AccountId,
        pending_code: PendingCode,
    ) -> Result<(), AccountStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET pending_code = $1, pending_code_expires_at = $2
                WHERE id = $3
            "#,
        )
        .bind(pending_code.code.as_str())
        .bind(pending_code.expires_at)
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Updating account profile in PostgreSQL", skip_all)]
    async fn update_profile(
        &self,
        id: &AccountId,
        update: ProfileUpdate,
    ) -> Result<Account, AccountStoreError> {
        let query = format!(
            r#"
                UPDATE accounts
                SET display_name = COALESCE($1, display_name),
                    phone = COALESCE($2, phone),
                    address = COALESCE($3, address),
                    image = COALESCE($4, image)
                WHERE id = $5
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(update.display_name)
            .bind(update.phone)
            .bind(update.address)
            .bind(update.image)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(AccountStoreError::AccountNotFound)?;

        Account::try_from(row)
    }

    /// One conditional UPDATE validates and clears the code, so two callers
    /// racing with the same code cannot both see it as valid.
    #[tracing::instrument(name = "Consuming pending code in PostgreSQL", skip_all)]
    async fn consume_code(
        &self,
        lookup: CodeLookup,
        code: &ActivationCode,
        now: DateTime<Utc>,
        consumption: CodeConsumption,
    ) -> Result<CodeValidationOutcome, AccountStoreError> {
        let requires_active = consumption.requires_active();
        let (activate, new_hash) = match consumption {
            CodeConsumption::Activate => (true, None),
            CodeConsumption::ResetCredential(hash) => {
                (false, Some(hash.as_ref().expose_secret().clone()))
            }
        };
        let key_column = match lookup {
            CodeLookup::ById(_) => "id",
            CodeLookup::ByEmail(_) => "email",
        };

        let update = format!(
            r#"
                UPDATE accounts
                SET pending_code = NULL,
                    pending_code_expires_at = NULL,
                    is_active = is_active OR $4,
                    password_hash = COALESCE($5, password_hash)
                WHERE {key_column} = $1
                  AND pending_code = $2
                  AND pending_code_expires_at > $3
                  AND is_active = $6
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );
        let update = sqlx::query_as::<_, AccountRow>(&update);
        let update = match &lookup {
            CodeLookup::ById(id) => update.bind(*id.as_uuid()),
            CodeLookup::ByEmail(email) => update.bind(email.as_ref().expose_secret().clone()),
        };
        let row = update
            .bind(code.as_str())
            .bind(now)
            .bind(activate)
            .bind(new_hash)
            .bind(requires_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        if let Some(row) = row {
            return Ok(CodeValidationOutcome::Valid(Box::new(Account::try_from(row)?)));
        }

        let probe = format!(
            "SELECT 1 FROM accounts WHERE {key_column} = $1 AND pending_code = $2 \
             AND is_active = $3"
        );
        let probe = sqlx::query_scalar::<_, i32>(&probe);
        let probe = match &lookup {
            CodeLookup::ById(id) => probe.bind(*id.as_uuid()),
            CodeLookup::ByEmail(email) => probe.bind(email.as_ref().expose_secret().clone()),
        };
        let holds_code = probe
            .bind(code.as_str())
            .bind(requires_active)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .is_some();

        Ok(if holds_code {
            CodeValidationOutcome::Expired
        } else {
            CodeValidationOutcome::NotFound
        })
    }

    #[tracing::instrument(name = "Listing accounts from PostgreSQL", skip_all)]
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<Account>, AccountStoreError> {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at, id LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, AccountRow>(&query)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        rows.into_iter().map(Account::try_from).collect()
    }

    #[tracing::instrument(name = "Counting accounts in PostgreSQL", skip_all)]
    async fn count(&self) -> Result<u64, AccountStoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;

        u64::try_from(count).map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Delete account from PostgreSQL", skip_all)]
    async fn delete(&self, id: &AccountId) -> Result<(), AccountStoreError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }
}
