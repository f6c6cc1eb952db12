//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI 3.1 document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the kiosk API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Suvidha Kiosk API",
        version = "0.1.0",
        description = "Identity-number validation and verification, and citizen registration, for the Suvidha service kiosk.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::identity::validate_identity,
        crate::routes::identity::verify_identity,
        crate::routes::citizens::register_citizen,
        crate::routes::citizens::get_citizen,
        crate::routes::citizens::verify_citizen_identity,
    ),
    components(schemas(
        crate::state::CitizenRecord,
        crate::state::CitizenStatus,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::identity::ValidateIdentityRequest,
        crate::routes::identity::ValidationResponse,
        crate::routes::identity::VerifyIdentityRequest,
        crate::routes::identity::VerificationResponse,
        crate::routes::citizens::RegisterCitizenRequest,
        crate::routes::citizens::VerifyCitizenRequest,
        crate::routes::citizens::CitizenVerificationResponse,
    )),
    tags(
        (name = "identity", description = "Identity-number validation and verification"),
        (name = "citizens", description = "Citizen registration and profile verification"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/v1/identity/validate",
            "/v1/identity/verify",
            "/v1/citizens",
            "/v1/citizens/{id}",
            "/v1/citizens/{id}/verify-identity",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
