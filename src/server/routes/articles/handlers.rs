use super::extract::{ArticleId, ArticlePayload};
use crate::error::ApiError;
use crate::model::{Article, NewArticle};
use crate::server::router::AppState;
use crate::validation::validate;
use axum::{Json, extract::State, http::StatusCode};
use tracing::{debug, info};

/// GET /articles
pub(super) async fn return_all_articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<Article>>, ApiError> {
    info!("Endpoint Hit: returnAllArticles");
    let articles = state.repo.list_all().await?;
    Ok(Json(articles))
}

/// GET /articles/{id}
pub(super) async fn return_single_article(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
) -> Result<Json<Article>, ApiError> {
    info!(id, "Endpoint Hit: returnSingleArticle");
    let article = state.repo.get_by_id(id).await?;
    Ok(Json(article))
}

/// POST /articles
///
/// Every missing required field is reported; storage is not touched unless all are present.
pub(super) async fn create_new_article(
    State(state): State<AppState>,
    ArticlePayload(input): ArticlePayload,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    info!("Endpoint Hit: createNewArticle");
    let new_article = validate(input).map_err(ApiError::Validation)?;
    let article = state.repo.insert(&new_article).await?;
    debug!(id = article.id, "Article created");
    Ok((StatusCode::CREATED, Json(article)))
}

/// PUT /articles/{id}
///
/// The id always comes from the path. No required-field check: unset fields are stored empty.
pub(super) async fn update_article(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
    ArticlePayload(input): ArticlePayload,
) -> Result<Json<Article>, ApiError> {
    info!(id, "Endpoint Hit: updateArticle");
    let update = NewArticle::from(input);
    if state.repo.update_by_id(id, &update).await? == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(Json(update.with_id(id)))
}

/// DELETE /articles/{id}
pub(super) async fn delete_article_by_id(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
) -> Result<StatusCode, ApiError> {
    info!(id, "Endpoint Hit: deleteArticleById");
    if state.repo.delete_by_id(id).await? == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
