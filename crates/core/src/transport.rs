use crate::config::ClientConfig;
use crate::traits::{Origin, Transport};
use crate::{QueryParameters, TransportError};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// reqwest-backed [`Transport`] for the public API and file origins.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    api_base: Url,
    files_base: Url,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_base: parse_base(&config.api_base_url)?,
            files_base: parse_base(&config.files_base_url)?,
        })
    }

    pub fn url_for(
        &self,
        origin: Origin,
        path: &str,
        query: &QueryParameters,
    ) -> Result<Url, TransportError> {
        let base = match origin {
            Origin::Api => &self.api_base,
            Origin::Files => &self.files_base,
        };
        let mut url = base.join(path.trim_start_matches('/'))?;
        query.apply_to(&mut url);
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_json(
        &self,
        origin: Origin,
        path: &str,
        query: &QueryParameters,
    ) -> Result<Value, TransportError> {
        let url = self.url_for(origin, path, query)?;
        debug!(?origin, url = %url, "GET");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                url: response.url().to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

/// Base URLs must end in `/`, otherwise `Url::join` replaces their last segment.
fn parse_base(raw: &str) -> Result<Url, url::ParseError> {
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{raw}/"))
    }
}
