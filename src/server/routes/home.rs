use tracing::info;

pub const WELCOME_MESSAGE: &str = "Welcome to home page";

/// GET /
pub async fn home_page() -> &'static str {
    info!("Endpoint Hit: homePage");
    WELCOME_MESSAGE
}
