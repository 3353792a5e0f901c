use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{AUTHORIZATION, HeaderMap},
    middleware::Next,
    web,
};
use rand::Rng;

use crate::templates_structs::ApiErrorResponse;

/// The bearer token the mock backend accepts.
#[derive(Debug, Clone)]
pub struct ApiToken(pub String);

/// Middleware function that checks for a matching `Authorization: Bearer` header.
/// Answers 401 with a JSON body when the header is missing or wrong.
pub async fn require_bearer(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let expected = req.app_data::<web::Data<ApiToken>>().map(|t| t.0.clone());
    let presented = bearer_token(req.headers());

    let authorized = match (expected, presented) {
        (Some(expected), Some(presented)) => constant_time_eq(&expected, &presented),
        _ => false,
    };

    if !authorized {
        log::debug!("Rejected unauthenticated {} {}", req.method(), req.path());
        let response = HttpResponse::Unauthorized().json(ApiErrorResponse {
            error: "Unauthorized".to_string(),
            details: Some("Missing or invalid bearer token".to_string()),
        });
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Generate a random 32-byte hex token.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();
    hex::encode(bytes)
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
