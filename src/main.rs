use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use chrono::Utc;

use salaplan::auth::middleware::{ApiToken, generate_token};
use salaplan::config::Config;
use salaplan::handlers;
use salaplan::store::MockStore;
use salaplan::templates_structs::ApiErrorResponse;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::from_env();
    env_logger::init();

    let token = match config.api_token.clone() {
        Some(token) => {
            log::info!("Using API token from environment");
            token
        }
        None => {
            let token = generate_token();
            log::warn!("No SALAPLAN_API_TOKEN set, generated one for this run: {token}");
            token
        }
    };

    let store = web::Data::new(MockStore::seeded(Utc::now().naive_utc()));
    let token = web::Data::new(ApiToken(token));

    log::info!("Starting mock API at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(token.clone())
            .configure(handlers::configure)
            .default_service(web::to(|| async {
                HttpResponse::NotFound().json(ApiErrorResponse {
                    error: "Not found".to_string(),
                    details: None,
                })
            }))
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
