use crate::config::{BookInfoConvention, ClientConfig, API_VERSION};
use crate::error::{ClientError, Entity, Result};
use crate::meta::{decode_meta, is_falsy};
use crate::models::{
    AuthorRecord, BookFile, BookInfo, Include, PageMetadata, PageResult, SearchHit, SearchOptions,
    SearchResults,
};
use crate::traits::{Origin, Transport};
use crate::transport::HttpTransport;
use crate::{QueryParameters, TransportError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Normalizes the upstream endpoints into typed results and a single error taxonomy.
///
/// Each operation applies only its own not-found rule; every other failure is
/// returned as-is.
pub struct TurathClient<T = HttpTransport> {
    transport: T,
    book_info_convention: BookInfoConvention,
}

impl TurathClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, config.book_info_convention))
    }
}

impl<T> TurathClient<T>
where
    T: Transport,
{
    pub fn with_transport(transport: T, book_info_convention: BookInfoConvention) -> Self {
        Self {
            transport,
            book_info_convention,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn author(&self, id: u64) -> Result<AuthorRecord> {
        let query = QueryParameters::new()
            .with("id", id)
            .with("ver", API_VERSION);
        let envelope = self.get_api("/author", &query).await?;

        match envelope.get("info") {
            Some(Value::String(info)) if !info.is_empty() => Ok(AuthorRecord { info: info.clone() }),
            _ => {
                debug!(id, "author envelope has no info");
                Err(ClientError::NotFound(Entity::Author(id)))
            }
        }
    }

    /// Fetches the whole-book snapshot. Only an HTTP 404 is read as not found.
    pub async fn book_file(&self, id: u64) -> Result<BookFile> {
        let path = format!("/{id}.json");
        let value = match self
            .transport
            .fetch_json(Origin::Files, &path, &QueryParameters::new())
            .await
        {
            Ok(value) => value,
            Err(TransportError::Status { status: 404, .. }) => {
                debug!(id, "book file returned 404");
                return Err(ClientError::NotFound(Entity::Book(id)));
            }
            Err(error) => return Err(error.into()),
        };

        reshape("book file", value)
    }

    pub async fn book_info(&self, id: u64) -> Result<BookInfo> {
        let query = QueryParameters::new()
            .with("id", id)
            .with("include", Include::Indexes.as_str())
            .with("ver", API_VERSION);
        let envelope = self.get_api("/book", &query).await?;

        match self.book_info_convention {
            BookInfoConvention::Payload => book_info_from_payload(id, envelope),
            BookInfoConvention::StatusCode => book_info_from_status_code(id, envelope),
        }
    }

    /// Not found only when both `meta` and `text` are empty.
    pub async fn page(&self, book_id: u64, page: u64) -> Result<PageResult> {
        let query = QueryParameters::new()
            .with("book_id", book_id)
            .with("pg", page)
            .with("ver", API_VERSION);
        let envelope = self.get_api("/page", &query).await?;

        let meta = envelope.get("meta");
        let text = envelope.get("text");
        if is_falsy(meta) && is_falsy(text) {
            debug!(book_id, page, "page envelope has neither meta nor text");
            return Err(ClientError::NotFound(Entity::Page { book_id, page }));
        }

        let meta = if is_falsy(meta) {
            PageMetadata::default()
        } else {
            decode_meta(meta)?
        };

        let text = match text {
            Some(Value::String(text)) => text.clone(),
            other if is_falsy(other) => String::new(),
            _ => {
                return Err(ClientError::InvalidResponse {
                    endpoint: "/page",
                    details: "`text` is not a string".to_string(),
                })
            }
        };

        Ok(PageResult { meta, text })
    }

    /// An empty hit list is a valid result. A hit whose `meta` fails to decode fails the call.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResults> {
        let params = options.to_query(query);
        let envelope = self.get_api("/search", &params).await?;
        let raw: RawSearchResults = reshape("/search", Value::Object(envelope))?;

        let data = raw
            .data
            .into_iter()
            .map(RawSearchHit::decode)
            .collect::<Result<Vec<_>>>()?;

        Ok(SearchResults {
            count: raw.count,
            data,
        })
    }

    async fn get_api(
        &self,
        endpoint: &'static str,
        query: &QueryParameters,
    ) -> Result<Map<String, Value>> {
        match self.transport.fetch_json(Origin::Api, endpoint, query).await? {
            Value::Object(envelope) => Ok(envelope),
            other => Err(ClientError::InvalidResponse {
                endpoint,
                details: format!("expected a JSON object, got {other}"),
            }),
        }
    }
}

fn book_info_from_payload(id: u64, envelope: Map<String, Value>) -> Result<BookInfo> {
    if is_falsy(envelope.get("meta")) && is_falsy(envelope.get("indexes")) {
        debug!(id, "book envelope has neither meta nor indexes");
        return Err(ClientError::NotFound(Entity::Book(id)));
    }

    reshape("/book", Value::Object(envelope))
}

fn book_info_from_status_code(id: u64, mut envelope: Map<String, Value>) -> Result<BookInfo> {
    match envelope.get("code").and_then(Value::as_f64) {
        Some(code) if code == 200.0 => {
            let body = match envelope.remove("data") {
                Some(data @ Value::Object(_)) => data,
                _ => Value::Object(envelope),
            };
            reshape("/book", body)
        }
        Some(code) if code == 404.0 => {
            debug!(id, "book envelope returned code 404");
            Err(ClientError::NotFound(Entity::Book(id)))
        }
        code => {
            warn!(id, ?code, "unrecognized book envelope code");
            Err(ClientError::Unknown {
                envelope: Value::Object(envelope),
            })
        }
    }
}

fn reshape<D>(endpoint: &'static str, value: Value) -> Result<D>
where
    D: DeserializeOwned,
{
    serde_json::from_value(value).map_err(|error| ClientError::InvalidResponse {
        endpoint,
        details: error.to_string(),
    })
}

#[derive(Deserialize)]
struct RawSearchResults {
    count: u64,
    #[serde(default)]
    data: Vec<RawSearchHit>,
}

#[derive(Deserialize)]
struct RawSearchHit {
    #[serde(default)]
    author_id: Option<u64>,
    #[serde(default)]
    book_id: Option<u64>,
    #[serde(default)]
    cat_id: Option<u64>,
    #[serde(default)]
    meta: Option<Value>,
    #[serde(default)]
    snip: Option<String>,
    #[serde(default)]
    text: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl RawSearchHit {
    fn decode(self) -> Result<SearchHit> {
        Ok(SearchHit {
            meta: decode_meta(self.meta.as_ref())?,
            author_id: self.author_id,
            book_id: self.book_id,
            cat_id: self.cat_id,
            snip: self.snip,
            text: self.text,
            extra: self.extra,
        })
    }
}
