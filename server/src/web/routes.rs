// server/src/web/routes.rs

use actix_web::web;

use crate::state::AppState;
use crate::web::handlers::{auth_handlers, dashboard_handlers, portfolio_handlers, project_handlers};

async fn health_check_handler(app_state: web::Data<AppState>) -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({
    "status": "ok",
    "store": app_state.config.store.kind(),
  }))
}

// Called from `main.rs` (and the tests) to mount the API on an Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/auth")
          .route("/register", web::post().to(auth_handlers::register_handler))
          .route("/login", web::post().to(auth_handlers::login_handler))
          .route("/logout", web::post().to(auth_handlers::logout_handler))
          .route("/me", web::get().to(auth_handlers::me_handler)),
      )
      .service(
        web::scope("/projects")
          .route("", web::get().to(project_handlers::list_projects_handler))
          .route("", web::post().to(project_handlers::create_project_handler))
          // Before `/{project_id}` so "mine" is not taken for an id.
          .route("/mine", web::get().to(project_handlers::my_projects_handler))
          .route("/{project_id}", web::patch().to(project_handlers::update_project_handler))
          .route(
            "/{project_id}/approve",
            web::post().to(project_handlers::approve_project_handler),
          )
          .route(
            "/{project_id}/reject",
            web::post().to(project_handlers::reject_project_handler),
          )
          .route("/{project_id}/fund", web::post().to(project_handlers::fund_project_handler))
          .route(
            "/{project_id}/investments",
            web::get().to(project_handlers::project_investments_handler),
          ),
      )
      .service(
        web::scope("/portfolio")
          .route("/metrics", web::get().to(portfolio_handlers::metrics_handler))
          .route("/history", web::get().to(portfolio_handlers::history_handler))
          .route("/breakdown", web::get().to(portfolio_handlers::breakdown_handler))
          .route("/performance", web::get().to(portfolio_handlers::performance_handler)),
      )
      .route(
        "/farmer/analytics",
        web::get().to(dashboard_handlers::farmer_analytics_handler),
      )
      .service(
        web::scope("/admin")
          .route("/overview", web::get().to(dashboard_handlers::admin_overview_handler))
          .route("/users", web::get().to(dashboard_handlers::admin_users_handler)),
      )
      .route("/dashboard", web::get().to(dashboard_handlers::dashboard_handler))
      .service(
        web::scope("/demo")
          .route("/seed", web::post().to(dashboard_handlers::seed_demo_handler))
          .route("/reset", web::post().to(dashboard_handlers::reset_demo_handler)),
      ),
  );
}
