//! `OpenAPI` document for the served routes.

use utoipa::OpenApi;

use crate::gate::AccountSummary;
use crate::pordego::handlers::{
    health::{self, Health},
    login::{self, LoginRequest, LoginResponse},
};

#[derive(OpenApi)]
#[openapi(
    paths(health::health, login::login),
    components(schemas(Health, LoginRequest, LoginResponse, AccountSummary)),
    tags(
        (name = "auth", description = "Credential verification and account-state decisions"),
        (name = "health", description = "Service and database health")
    )
)]
pub struct ApiDoc;
