//! Validating JSON extractor
//!
//! `ValidJson<R>` deserializes the body into the raw request type `R` and runs
//! its [`Validate`] impl. Handlers receive the typed `R::Output`; every
//! failing field is reported at once as a 400 with an `errors` array.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;
use crate::shared::validation::Validate;

/// JSON body that has already passed validation
pub struct ValidJson<R: Validate>(pub R::Output);

impl<R: Validate> std::fmt::Debug for ValidJson<R>
where
    R::Output: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ValidJson").field(&self.0).finish()
    }
}

impl<S, R> FromRequest<S> for ValidJson<R>
where
    S: Send + Sync,
    R: Validate + DeserializeOwned + Send,
    R::Output: Send,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<R>::from_request(req, state).await?;
        let output = raw.validate().into_result()?;
        Ok(ValidJson(output))
    }
}
