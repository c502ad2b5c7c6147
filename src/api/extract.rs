//! Body and query extractors whose rejections use the `AppError` envelope

use crate::error::AppError;
use axum::extract::{FromRequest, FromRequestParts};

/// `axum::Json` rejecting with [`AppError::Validation`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` rejecting with [`AppError::Validation`]
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
