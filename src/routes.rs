// routes.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handler::{
        admin::admin_handler,
        auth::{auth_handler, me},
        jobs::{jobs_handler, list_jobs},
        messages::messages_handler,
        proposals::proposals_handler,
        reviews::reviews_handler,
        users::users_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let auth_routes = auth_handler().merge(
        Router::new()
            .route("/me", get(me))
            .layer(middleware::from_fn(auth)),
    );

    // Browsing the job board needs no account; everything else under
    // /jobs does.
    let job_routes = Router::new()
        .route("/", get(list_jobs))
        .merge(jobs_handler().layer(middleware::from_fn(auth)));

    let api_route = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/jobs", job_routes)
        .nest(
            "/proposals",
            proposals_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/messages",
            messages_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/reviews",
            reviews_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/admin", admin_handler().layer(middleware::from_fn(auth)))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
        .fallback_service(ServeDir::new("static"))
}
