//! JSON body extractor that reports malformed input as 400

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AuthError;

/// Like [`axum::Json`], but a body that fails to parse is a
/// [`AuthError::BadRequest`] carrying the parser's message
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AuthError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
            })?;

        Ok(Self(value))
    }
}
