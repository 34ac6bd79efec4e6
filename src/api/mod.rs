//! Classification service abstraction
//!
//! All traffic to the prediction backend goes through [`ClassifierApi`].
//! The upload controller only sees the trait, so tests drive it with a fake
//! and the HTTP details stay in [`http`].

pub mod http;

use crate::error::Result;
use crate::types::{HealthStatus, ImageFile, PredictionResult};
use std::future::Future;

pub use http::HttpClassifier;

pub trait ClassifierApi: Send + Sync + 'static {
    /// Upload one image and decode the ranked prediction.
    ///
    /// Every failure (transport, non-2xx, bad payload) is an `Err`; callers
    /// decide what the user sees.
    fn classify(&self, image: ImageFile) -> impl Future<Output = Result<PredictionResult>> + Send;

    /// Query the backend's liveness route.
    fn health(&self) -> impl Future<Output = Result<HealthStatus>> + Send;
}
