//! The authentication gate: the credential-verification and account-state
//! decision procedure used at login.
//!
//! `authenticate` performs at most one store lookup and one hash verification
//! per call, holds no state across calls, and never mutates accounts. Every
//! outcome, including store and hasher faults, is folded into an
//! [`AuthResult`]; nothing is thrown past the gate boundary.

pub mod account;
pub mod hasher;
pub mod outcome;
pub mod schema;
pub mod store;

pub use account::{Account, AccountSummary};
pub use hasher::{Argon2Hasher, SecretHasher};
pub use outcome::{AuthResult, DenyReason, Remediation};
pub use store::{CredentialStore, PgCredentialStore};

use hasher::DUMMY_SECRET_HASH;
use tracing::{debug, error};

/// The gate over a credential store and a secret hasher.
pub struct Gate<S, H> {
    store: S,
    hasher: H,
}

/// The gate as wired in the server: Postgres store, Argon2 hasher.
pub type PgGate = Gate<PgCredentialStore, Argon2Hasher>;

impl<S: CredentialStore, H: SecretHasher> Gate<S, H> {
    pub fn new(store: S, hasher: H) -> Self {
        Self { store, hasher }
    }

    /// Decide whether a session may be granted for `identity` + `secret`.
    ///
    /// Steps are ordered and short-circuiting: input schema, account lookup,
    /// secret verification, verified flag, approved flag. Absent accounts and
    /// wrong secrets yield the same denial, and a miss still burns one hash
    /// verification so it is not observably faster than a mismatch.
    pub async fn authenticate(&self, identity: &str, secret: &str) -> AuthResult {
        let identity = schema::normalize_identity(identity);
        if !schema::valid_identity(&identity) || !schema::valid_secret(secret) {
            debug!("Login input failed schema validation");
            return AuthResult::denied(DenyReason::InvalidInput);
        }

        let account = match self.store.find_by_identity(&identity).await {
            Ok(account) => account,
            Err(err) => {
                error!("Credential store lookup failed: {err:#}");
                return AuthResult::denied(DenyReason::InternalError);
            }
        };

        let Some(account) = account else {
            let _ = self.hasher.verify(secret, DUMMY_SECRET_HASH).await;
            return AuthResult::denied(DenyReason::InvalidCredentials);
        };

        // No stored hash means no usable credential; same denial as a miss.
        let Some(stored_hash) = account.secret_hash.as_deref() else {
            let _ = self.hasher.verify(secret, DUMMY_SECRET_HASH).await;
            return AuthResult::denied(DenyReason::InvalidCredentials);
        };

        match self.hasher.verify(secret, stored_hash).await {
            Ok(true) => {}
            Ok(false) => return AuthResult::denied(DenyReason::InvalidCredentials),
            Err(err) => {
                error!("Secret verification failed: {err:#}");
                return AuthResult::denied(DenyReason::InternalError);
            }
        }

        if !account.verified {
            return AuthResult::denied(DenyReason::EmailNotVerified {
                email: account.email.clone(),
            });
        }

        if !account.approved {
            return AuthResult::denied(DenyReason::ApprovalPending);
        }

        AuthResult::Granted {
            account: account.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use std::collections::HashMap;
    use uuid::Uuid;

    /// In-memory store keyed by normalized identity.
    struct MemoryStore {
        accounts: HashMap<String, Account>,
    }

    impl MemoryStore {
        fn with(accounts: Vec<Account>) -> Self {
            Self {
                accounts: accounts
                    .into_iter()
                    .map(|account| (account.email.clone(), account))
                    .collect(),
            }
        }
    }

    impl CredentialStore for MemoryStore {
        async fn find_by_identity(&self, identity: &str) -> Result<Option<Account>> {
            Ok(self.accounts.get(identity).cloned())
        }
    }

    struct FailingStore;

    impl CredentialStore for FailingStore {
        async fn find_by_identity(&self, _identity: &str) -> Result<Option<Account>> {
            Err(anyhow!("connection reset by peer"))
        }
    }

    /// Plain-equality stand-in for Argon2 so tests stay fast.
    struct MockHasher;

    impl SecretHasher for MockHasher {
        async fn verify(&self, secret: &str, stored_hash: &str) -> Result<bool> {
            Ok(secret == stored_hash)
        }
    }

    struct FailingHasher;

    impl SecretHasher for FailingHasher {
        async fn verify(&self, _secret: &str, _stored_hash: &str) -> Result<bool> {
            Err(anyhow!("hashing backend timed out"))
        }
    }

    fn account(email: &str, secret: &str, verified: bool, approved: bool) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            secret_hash: Some(secret.to_string()),
            verified,
            approved,
            name: "Astra Singh".to_string(),
            role: "student".to_string(),
            avatar_url: None,
        }
    }

    fn gate(accounts: Vec<Account>) -> Gate<MemoryStore, MockHasher> {
        Gate::new(MemoryStore::with(accounts), MockHasher)
    }

    #[tokio::test]
    async fn empty_input_is_invalid_input() {
        let gate = gate(vec![]);
        assert_eq!(
            gate.authenticate("", "secret").await,
            AuthResult::denied(DenyReason::InvalidInput)
        );
        assert_eq!(
            gate.authenticate("a@example.com", "").await,
            AuthResult::denied(DenyReason::InvalidInput)
        );
        assert_eq!(
            gate.authenticate("not-an-email", "secret").await,
            AuthResult::denied(DenyReason::InvalidInput)
        );
    }

    #[tokio::test]
    async fn unknown_identity_is_invalid_credentials() {
        let gate = gate(vec![account("known@example.com", "pw", false, false)]);
        let result = gate.authenticate("unknown@example.com", "pw").await;
        // Never EmailNotVerified/ApprovalPending for unknown identities.
        assert_eq!(result, AuthResult::denied(DenyReason::InvalidCredentials));
    }

    #[tokio::test]
    async fn wrong_secret_matches_unknown_identity_shape() {
        let gate = gate(vec![account("known@example.com", "pw", true, true)]);
        let wrong = gate.authenticate("known@example.com", "nope").await;
        let unknown = gate.authenticate("unknown@example.com", "nope").await;
        assert_eq!(wrong, AuthResult::denied(DenyReason::InvalidCredentials));
        assert_eq!(wrong, unknown);
    }

    #[tokio::test]
    async fn missing_secret_hash_can_never_be_granted() {
        let mut orphan = account("known@example.com", "pw", true, true);
        orphan.secret_hash = None;
        let gate = gate(vec![orphan]);
        assert_eq!(
            gate.authenticate("known@example.com", "pw").await,
            AuthResult::denied(DenyReason::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn unverified_account_gets_resend_remediation() {
        let gate = gate(vec![account("known@example.com", "pw", false, true)]);
        assert_eq!(
            gate.authenticate("known@example.com", "pw").await,
            AuthResult::Denied {
                reason: DenyReason::EmailNotVerified {
                    email: "known@example.com".to_string()
                },
                remediation: Some(Remediation::ResendVerification),
            }
        );
    }

    #[tokio::test]
    async fn unverified_account_with_wrong_secret_stays_generic() {
        // Secret check comes before the verified check, so a wrong secret
        // must not leak the verification state.
        let gate = gate(vec![account("known@example.com", "pw", false, true)]);
        assert_eq!(
            gate.authenticate("known@example.com", "nope").await,
            AuthResult::denied(DenyReason::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn unapproved_account_gets_approval_remediation() {
        let gate = gate(vec![account("known@example.com", "pw", true, false)]);
        assert_eq!(
            gate.authenticate("known@example.com", "pw").await,
            AuthResult::Denied {
                reason: DenyReason::ApprovalPending,
                remediation: Some(Remediation::ViewApprovalStatus),
            }
        );
    }

    #[tokio::test]
    async fn verified_and_approved_is_granted() {
        let gate = gate(vec![account(
            "contact.singhastra@gmail.com",
            "CorrectPass1!",
            true,
            true,
        )]);
        let result = gate
            .authenticate("contact.singhastra@gmail.com", "CorrectPass1!")
            .await;
        let AuthResult::Granted { account } = result else {
            panic!("expected a grant, got {result:?}");
        };
        assert_eq!(account.email, "contact.singhastra@gmail.com");
        assert_eq!(account.name, "Astra Singh");
        assert_eq!(account.role, "student");
    }

    #[tokio::test]
    async fn identity_is_normalized_before_lookup() {
        let gate = gate(vec![account("known@example.com", "pw", true, true)]);
        let result = gate.authenticate("  Known@Example.COM ", "pw").await;
        assert!(matches!(result, AuthResult::Granted { .. }));
    }

    #[tokio::test]
    async fn granted_summary_never_contains_the_hash() -> Result<()> {
        let gate = gate(vec![account("known@example.com", "pw", true, true)]);
        let result = gate.authenticate("known@example.com", "pw").await;
        let AuthResult::Granted { account } = result else {
            panic!("expected a grant");
        };
        let rendered = serde_json::to_string(&account)?;
        assert!(!rendered.contains("pw\""));
        assert!(!rendered.contains("secret_hash"));
        Ok(())
    }

    #[tokio::test]
    async fn store_fault_is_internal_error() {
        let gate = Gate::new(FailingStore, MockHasher);
        assert_eq!(
            gate.authenticate("known@example.com", "pw").await,
            AuthResult::denied(DenyReason::InternalError)
        );
    }

    #[tokio::test]
    async fn hasher_fault_is_internal_error() {
        let gate = Gate::new(
            MemoryStore::with(vec![account("known@example.com", "pw", true, true)]),
            FailingHasher,
        );
        assert_eq!(
            gate.authenticate("known@example.com", "pw").await,
            AuthResult::denied(DenyReason::InternalError)
        );
    }

    #[tokio::test]
    async fn real_hasher_end_to_end() -> Result<()> {
        // Same flow as above, but through the real Argon2 hasher.
        let hasher = Argon2Hasher;
        let mut acct = account("contact.singhastra@gmail.com", "", true, true);
        acct.secret_hash = Some(hasher.hash("CorrectPass1!")?);
        let gate = Gate::new(MemoryStore::with(vec![acct]), Argon2Hasher);

        let granted = gate
            .authenticate("contact.singhastra@gmail.com", "CorrectPass1!")
            .await;
        assert!(matches!(granted, AuthResult::Granted { .. }));

        let denied = gate
            .authenticate("contact.singhastra@gmail.com", "WrongPass1!")
            .await;
        assert_eq!(denied, AuthResult::denied(DenyReason::InvalidCredentials));
        Ok(())
    }
}
