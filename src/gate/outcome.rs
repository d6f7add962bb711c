//! Gate outcomes: grant, denial reasons, and remediations.

use super::account::AccountSummary;

/// Why a login attempt was denied.
///
/// Unknown identity and wrong secret are deliberately merged into
/// [`DenyReason::InvalidCredentials`] so callers cannot probe which accounts
/// exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// Input failed the login schema (empty or malformed identity/secret).
    InvalidInput,
    /// Identity absent or secret mismatch; indistinguishable on purpose.
    InvalidCredentials,
    /// Correct secret, but the email address was never verified. Carries the
    /// identity so the caller can offer a resend.
    EmailNotVerified { email: String },
    /// Correct secret and verified, but an operator has not approved the
    /// account yet.
    ApprovalPending,
    /// Store or hasher fault; details are logged, never surfaced.
    InternalError,
}

/// Follow-up action a denied caller should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    ResendVerification,
    ViewApprovalStatus,
}

impl DenyReason {
    /// The remediation implied by this denial, if any.
    #[must_use]
    pub fn remediation(&self) -> Option<Remediation> {
        match self {
            Self::EmailNotVerified { .. } => Some(Remediation::ResendVerification),
            Self::ApprovalPending => Some(Remediation::ViewApprovalStatus),
            Self::InvalidInput | Self::InvalidCredentials | Self::InternalError => None,
        }
    }
}

/// Outcome of one `authenticate` call. Produced fresh per call; not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Granted {
        account: AccountSummary,
    },
    Denied {
        reason: DenyReason,
        remediation: Option<Remediation>,
    },
}

impl AuthResult {
    /// Build a denial with the remediation the reason implies.
    #[must_use]
    pub fn denied(reason: DenyReason) -> Self {
        let remediation = reason.remediation();
        Self::Denied {
            reason,
            remediation,
        }
    }
}
