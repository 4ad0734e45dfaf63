use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Failure raised by a [`crate::Transport`] before any response normalization happens.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} failed with status {status}")]
    Status {
        status: u16,
        status_text: String,
        url: String,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(error) => error.status().map(|status| status.as_u16()),
            Self::Url(_) => None,
        }
    }
}

/// The upstream entity a not-found error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Author(u64),
    Book(u64),
    Page { book_id: u64, page: u64 },
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Author(id) => write!(f, "Author {id}"),
            Self::Book(id) => write!(f, "Book {id}"),
            Self::Page { book_id, page } => write!(f, "Book {book_id}, page {page}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0} not found")]
    NotFound(Entity),

    /// `Value` displays as compact JSON and its default map keeps keys sorted.
    #[error("Unknown error: {envelope}")]
    Unknown { envelope: Value },

    #[error("failed to decode `{field}`: {source}")]
    Decode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid response from {endpoint}: {details}")]
    InvalidResponse {
        endpoint: &'static str,
        details: String,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// HTTP status of the underlying transport failure, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(error) => error.status(),
            _ => None,
        }
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn not_found_messages_embed_identifiers() {
        assert_eq!(
            ClientError::NotFound(Entity::Author(123)).to_string(),
            "Author 123 not found"
        );
        assert_eq!(
            ClientError::NotFound(Entity::Book(9)).to_string(),
            "Book 9 not found"
        );
        assert_eq!(
            ClientError::NotFound(Entity::Page {
                book_id: 17616,
                page: 141
            })
            .to_string(),
            "Book 17616, page 141 not found"
        );
    }

    #[test]
    fn unknown_error_serializes_envelope_compactly_with_sorted_keys() {
        let envelope = json!({"status": false, "message": "Internal Server Error", "code": 500});
        let error = ClientError::Unknown { envelope };
        assert_eq!(
            error.to_string(),
            r#"Unknown error: {"code":500,"message":"Internal Server Error","status":false}"#
        );
    }

    #[test]
    fn transport_status_is_exposed_through_client_error() {
        let error = ClientError::from(TransportError::Status {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            url: "https://api.turath.io/page".to_string(),
        });
        assert_eq!(error.status(), Some(503));
        assert!(!error.is_not_found());
        assert_eq!(
            error.to_string(),
            "Request to https://api.turath.io/page failed with status 503"
        );
    }
}
