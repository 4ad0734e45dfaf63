pub mod client;
pub mod config;
pub mod error;
pub mod meta;
pub mod models;
pub mod query;
pub mod traits;
pub mod transport;

pub use client::TurathClient;
pub use config::{
    BookInfoConvention, ClientConfig, API_VERSION, DEFAULT_API_BASE_URL, DEFAULT_FILES_BASE_URL,
};
pub use error::{ClientError, Entity, Result, TransportError};
pub use meta::decode_meta;
pub use models::{
    AuthorRecord, BookFile, BookFileIndexes, BookFileMeta, BookHeading, BookIndexes, BookInfo,
    BookMeta, BookPage, GeneratedIndexes, Include, PageLabel, PageMetadata, PageResult, SearchHit,
    SearchOptions, SearchResults, SortField,
};
pub use query::{QueryParameters, QueryValue};
pub use traits::{Origin, Transport};
pub use transport::HttpTransport;
