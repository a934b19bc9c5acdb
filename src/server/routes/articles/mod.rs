use crate::server::router::AppState;
use axum::{Router, routing::get};

pub mod extract;
pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/articles",
            get(handlers::return_all_articles).post(handlers::create_new_article),
        )
        .route(
            "/articles/{id}",
            get(handlers::return_single_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article_by_id),
        )
}
