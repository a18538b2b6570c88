//! Request extractors
//!
//! Body and query extractors whose rejections render as `{"error": ...}` through [`AppError`].

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use kernel::error::app_error::AppError;
use serde::de::DeserializeOwned;

/// JSON body extractor rejecting with a 400 `AppError`
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Rejected request body");
                Err(AppError::bad_request(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))
                .with_source(rejection))
            }
        }
    }
}

/// Query string extractor rejecting with a 400 `AppError`
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(AppQuery(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Rejected query string");
                Err(AppError::bad_request(format!(
                    "Invalid query string: {}",
                    rejection.body_text()
                ))
                .with_source(rejection))
            }
        }
    }
}
