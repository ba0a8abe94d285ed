use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    get_company_interval, get_company_ranking_history, get_company_snapshot, health,
    list_companies_by_category, list_ranked_companies, openapi,
};
use crate::state::AppState;

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi))
        .route("/company/ranking", get(list_ranked_companies))
        .route("/company/ranks/:category", get(list_companies_by_category))
        .route("/company/:company_id", get(get_company_snapshot))
        .route("/company/:company_id/interval", get(get_company_interval))
        .route(
            "/company/:company_id/ranking/history",
            get(get_company_ranking_history),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
