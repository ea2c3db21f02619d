//! Request extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections, so every failure shares the JSON error body.

use axum::extract::{FromRequest, FromRequestParts, Request};
use validator::Validate;

use crate::error::AppError;

/// `axum::Json` with JSON error responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` with JSON error responses.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// JSON body that must also pass its `validator` rules before the handler
/// runs.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: Validate + Send,
    AppJson<T>: FromRequest<S, Rejection = AppError>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let AppJson(value) = AppJson::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
