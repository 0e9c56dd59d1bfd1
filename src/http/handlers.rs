//! Article handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;
use store_object::ArticleChanges;

use super::ApiState;
use super::error::ApiError;
use super::identity::Identity;
use crate::articles::{parse_article_id, parse_article_id_lossy};

/// Create/update request body. Absent fields bind as empty strings.
#[derive(Debug, Deserialize)]
pub struct ArticlePayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
}

impl From<ArticlePayload> for ArticleChanges {
    fn from(payload: ArticlePayload) -> Self {
        ArticleChanges {
            title: payload.title,
            description: payload.description,
            content: payload.content,
        }
    }
}

pub async fn list_articles(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let articles = state.articles.list().await?;
    Ok(Json(articles))
}

pub async fn get_article(
    State(state): State<ApiState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let article = state.articles.get(parse_article_id_lossy(&raw_id)).await?;
    Ok(Json(article))
}

pub async fn create_article(
    State(state): State<ApiState>,
    identity: Option<Extension<Identity>>,
    payload: Result<Json<ArticlePayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let author = identity.map(|Extension(identity)| identity.user_id);

    let created = state.articles.create(author, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_article(
    State(state): State<ApiState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ArticlePayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_article_id(&raw_id)?;
    let Json(payload) = payload?;

    let updated = state.articles.update(id, payload.into()).await?;
    Ok(Json(updated))
}

pub async fn delete_article(
    State(state): State<ApiState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // The invalidation task is left detached; the response does not wait for it
    let _pending = state
        .articles
        .delete(parse_article_id_lossy(&raw_id))
        .await?;
    Ok(Json(json!({ "message": "Article deleted successfully" })))
}
