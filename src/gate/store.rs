//! Credential store: account lookup by identity.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;

use super::account::Account;

/// Read-only account lookup.
///
/// Absence is a normal result, never an error; `Err` is reserved for faults
/// such as a lost database connection.
#[allow(async_fn_in_trait)]
pub trait CredentialStore {
    async fn find_by_identity(&self, identity: &str) -> Result<Option<Account>>;
}

/// Postgres-backed credential store.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialStore for PgCredentialStore {
    async fn find_by_identity(&self, identity: &str) -> Result<Option<Account>> {
        let query = r"
            SELECT id, email, secret_hash, email_verified, approved, name, role, avatar_url
            FROM accounts
            WHERE email = $1
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(identity)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to look up account by identity")?;

        Ok(row.map(|row| Account {
            id: row.get("id"),
            email: row.get("email"),
            secret_hash: row.get("secret_hash"),
            verified: row.get("email_verified"),
            approved: row.get("approved"),
            name: row.get("name"),
            role: row.get("role"),
            avatar_url: row.get("avatar_url"),
        }))
    }
}
