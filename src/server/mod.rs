pub mod router;
pub mod routes;

pub use router::{AppState, app, article_router};
