//! JSON body extractor with the API's error contract.
//!
//! Axum's stock `Json` rejects malformed bodies with 422; this API promises
//! 400 with a `VALIDATION_ERROR` code for any body that fails to parse —
//! including type mismatches like a string where a boolean belongs. Handlers
//! take `extract::Json<T>` for request bodies and can return it as a
//! response too.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use mentora_core::error::CoreError;
use serde::Serialize;

use crate::error::AppError;

pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) => Err(AppError::Core(CoreError::Validation(rejection.body_text()))),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
