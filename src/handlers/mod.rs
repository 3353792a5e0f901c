pub mod api;
pub mod dashboard;

use actix_web::web;

/// Register every mock-backend route: the four collections behind the bearer
/// guard, plus the public dashboard and health check.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(api::health))
        .route("/dashboard", web::get().to(dashboard::index));
    api::configure(cfg);
}
