//! The login endpoint: binds the authentication gate to HTTP.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::gate::{AccountSummary, AuthResult, DenyReason, PgGate, Remediation};

const CODE_EMAIL_NOT_VERIFIED: &str = "EMAIL_NOT_VERIFIED";
const CODE_APPROVAL_PENDING: &str = "APPROVAL_PENDING";
const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Where the frontend sends users whose account awaits approval.
const APPROVAL_STATUS_PATH: &str = "/auth/approval-status";

#[derive(ToSchema, Deserialize, Debug)]
pub struct LoginRequest {
    email: String,
    /// Redacted in logs; only exposed to the gate.
    #[schema(value_type = String)]
    password: SecretString,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Carried on `EMAIL_NOT_VERIFIED` so the caller can offer a resend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AccountSummary>,
}

impl LoginResponse {
    fn granted(user: AccountSummary) -> Self {
        Self {
            success: true,
            message: None,
            code: None,
            email: None,
            redirect_url: None,
            user: Some(user),
        }
    }

    fn denied(message: &str, code: Option<&str>) -> Self {
        Self {
            success: false,
            message: Some(message.to_string()),
            code: code.map(ToString::to_string),
            email: None,
            redirect_url: None,
            user: None,
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed login payload", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = LoginResponse),
        (status = 403, description = "Email not verified or approval pending", body = LoginResponse),
        (status = 500, description = "Store or hasher fault", body = LoginResponse),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    gate: Extension<Arc<PgGate>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let request: LoginRequest = match payload {
        Some(Json(payload)) => payload,
        None => {
            return respond(AuthResult::denied(DenyReason::InvalidInput));
        }
    };

    debug!("Login attempt for {}", request.email);

    let result = gate
        .authenticate(&request.email, request.password.expose_secret())
        .await;

    respond(result)
}

/// Map a gate outcome onto the caller-facing result shape.
fn respond(result: AuthResult) -> (StatusCode, Json<LoginResponse>) {
    match result {
        AuthResult::Granted { account } => (StatusCode::OK, Json(LoginResponse::granted(account))),
        AuthResult::Denied {
            reason,
            remediation,
        } => {
            let (status, mut response) = match &reason {
                DenyReason::InvalidInput => (
                    StatusCode::BAD_REQUEST,
                    LoginResponse::denied("Invalid email or password format", None),
                ),
                DenyReason::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    LoginResponse::denied("Invalid credentials", None),
                ),
                DenyReason::EmailNotVerified { email } => {
                    let mut response = LoginResponse::denied(
                        "Please verify your email before logging in",
                        Some(CODE_EMAIL_NOT_VERIFIED),
                    );
                    response.email = Some(email.clone());
                    (StatusCode::FORBIDDEN, response)
                }
                DenyReason::ApprovalPending => (
                    StatusCode::FORBIDDEN,
                    LoginResponse::denied(
                        "Your account is pending approval",
                        Some(CODE_APPROVAL_PENDING),
                    ),
                ),
                DenyReason::InternalError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    LoginResponse::denied("An unexpected error occurred", Some(CODE_INTERNAL_ERROR)),
                ),
            };

            if remediation == Some(Remediation::ViewApprovalStatus) {
                response.redirect_url = Some(APPROVAL_STATUS_PATH.to_string());
            }

            (status, Json(response))
        }
    }
}
