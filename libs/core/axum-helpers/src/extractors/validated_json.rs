//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has passed `Validate`.
///
/// Every failure is a 400: unreadable or mistyped bodies surface as
/// [`AppError::JsonExtractorRejection`] (axum's own 422 for missing fields is
/// folded into 400), and rule violations as [`AppError::ValidationError`]
/// with per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(length(min = 2))]
///     name: String,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) -> String {
///     payload.name
/// }
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
