pub mod collections;

use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    middleware::{Next, from_fn},
    web,
};

use crate::auth::middleware::require_bearer;
use crate::errors::AppError;
use crate::store::{Collection, MockStore};
use crate::templates_structs::{ApiErrorResponse, HealthResponse};

/// Reject mutations whose body is not declared as JSON.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == Method::POST || method == Method::PUT || method == Method::PATCH {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let response = HttpResponse::UnsupportedMediaType().json(ApiErrorResponse {
                error: "Unsupported media type".to_string(),
                details: Some("Content-Type must be application/json".to_string()),
            });
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// GET /health
pub async fn health(store: web::Data<MockStore>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        collections: store.counts(),
    })
}

/// Configure the collection routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());

    for collection in Collection::ALL {
        cfg.service(
            web::scope(&format!("/{}", collection.path()))
                .app_data(web::Data::new(collection))
                .app_data(json_config.clone())
                .wrap(from_fn(require_json_content_type))
                .wrap(from_fn(require_bearer))
                .route("", web::get().to(collections::list))
                .route("", web::post().to(collections::create))
                .route("/{id}", web::get().to(collections::read))
                .route("/{id}", web::put().to(collections::update))
                .route("/{id}", web::patch().to(collections::update))
                .route("/{id}", web::delete().to(collections::delete)),
        );
    }
}
