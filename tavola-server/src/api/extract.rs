//! Request body extraction
//!
//! Browser forms post `application/x-www-form-urlencoded`, API clients post
//! JSON. [`FormOrJson`] accepts either, chosen by `Content-Type`.

use axum::extract::{FromRequest, Request};
use axum::{Form, Json};
use http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use crate::utils::AppError;

/// Body extractor for form posts that also accepts JSON
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            let mime = ct.split(';').next().unwrap_or_default().trim();
            mime == "application/json" || mime.ends_with("+json")
        })
}

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rej| AppError::invalid_request(rej.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rej| AppError::invalid_request(rej.body_text()))?;
            Ok(Self(value))
        }
    }
}
