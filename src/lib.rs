use crate::api::APIResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::error::Error;

pub mod api;
pub mod bookmarks;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod server;
pub mod store;

pub const SERVICE_NAME: &str = "web-collector-backend";

pub fn server_error() -> Response {
    let body = APIResponse::new_from_error("Internal server error").with_message("Something went wrong");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

pub fn bad_request(details: &str) -> Response {
    let body = APIResponse::new_from_error("Invalid request body").with_details(details);
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

pub fn not_found(msg: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(APIResponse::new_from_error(msg))).into_response()
}

pub fn good_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(APIResponse::ok(data))).into_response()
}

pub fn message_response(msg: &str) -> Response {
    (StatusCode::OK, Json(APIResponse::new_from_msg(msg))).into_response()
}

pub fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(APIResponse::ok(data))).into_response()
}

pub fn unpack_error(err: &(dyn Error)) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
