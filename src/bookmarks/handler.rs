use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::Response,
};

use crate::error::HandlerError;
use crate::handler::AppState;
use crate::model::{CreateBookmark, UpdateBookmark};
use crate::{created, good_response, not_found};

const NOT_FOUND: &str = "Bookmark not found";

pub async fn list_bookmarks(State(state): State<AppState>) -> Result<Response, HandlerError> {
    let bookmarks = state.store.get_all()?;
    tracing::debug!(count = bookmarks.len(), "listed bookmarks");
    Ok(good_response(bookmarks))
}

pub async fn get_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HandlerError> {
    match state.store.get_by_id(&id)? {
        Some(bookmark) => Ok(good_response(bookmark)),
        None => {
            tracing::info!(id = %id, "bookmark not found");
            Ok(not_found(NOT_FOUND))
        }
    }
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookmark>, JsonRejection>,
) -> Result<Response, HandlerError> {
    let Json(payload) = payload?;
    payload.validate().map_err(HandlerError::Validation)?;

    let bookmark = state.store.create(&payload.title, &payload.url)?;
    tracing::info!(id = %bookmark.id, url = %bookmark.url, "created bookmark");
    Ok(created(bookmark))
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Option<UpdateBookmark>>, JsonRejection>,
) -> Result<Response, HandlerError> {
    let Json(payload) = payload?;
    let payload = payload.unwrap_or_default();

    match state.store.update(&id, payload.title(), payload.url())? {
        Some(bookmark) => {
            tracing::info!(id = %id, "updated bookmark");
            Ok(good_response(bookmark))
        }
        None => {
            tracing::info!(id = %id, "bookmark not found for update");
            Ok(not_found(NOT_FOUND))
        }
    }
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HandlerError> {
    if !state.store.delete(&id)? {
        tracing::info!(id = %id, "bookmark not found for delete");
        return Ok(not_found(NOT_FOUND));
    }

    tracing::info!(id = %id, "deleted bookmark");
    Ok(crate::message_response("Bookmark deleted"))
}
