use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path},
};

use crate::error::AppError;

/// `Json<T>` whose rejections (missing fields, wrong types, bad syntax) come
/// back as `AppError::Validation` with the usual `{"message": ...}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);

/// `Path<T>` with the same error shape as [`ValidJson`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ValidPath<T>(pub T);
