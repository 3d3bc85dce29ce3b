pub mod api_state;
pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};

use api_state::ApiState;

pub fn api_routes_v1(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/search", post(routes::search::search_handler))
        .route("/api/v1/graph", get(routes::graph::knowledge_graph_handler))
        .route(
            "/api/v1/articles/by-ids",
            post(routes::articles::articles_by_ids_handler),
        )
        .route(
            "/api/v1/articles/recent",
            get(routes::articles::recent_articles_handler),
        )
        .with_state(state)
}
