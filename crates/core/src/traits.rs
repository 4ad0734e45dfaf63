use crate::{QueryParameters, TransportError};
use async_trait::async_trait;
use serde_json::Value;

/// Which upstream origin a request is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The parameterized JSON API.
    Api,
    /// The static per-book file store.
    Files,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// GETs `path` under `origin` and decodes the body as JSON.
    ///
    /// Non-2xx responses fail with [`TransportError::Status`].
    async fn fetch_json(
        &self,
        origin: Origin,
        path: &str,
        query: &QueryParameters,
    ) -> Result<Value, TransportError>;
}
