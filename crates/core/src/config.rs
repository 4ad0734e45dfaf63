use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Protocol version sent as `ver` on every query-API request.
pub const API_VERSION: u32 = 3;

pub const DEFAULT_API_BASE_URL: &str = "https://api.turath.io/";
pub const DEFAULT_FILES_BASE_URL: &str = "https://files.turath.io/books/";

/// How the `/book` endpoint signals success and absence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookInfoConvention {
    /// The envelope is the book itself; missing `meta` and `indexes` means not found.
    #[default]
    Payload,
    /// The envelope carries a numeric `code`: 200 ok, 404 not found, anything else unknown.
    StatusCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub files_base_url: String,
    pub book_info_convention: BookInfoConvention,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            files_base_url: DEFAULT_FILES_BASE_URL.to_string(),
            book_info_convention: BookInfoConvention::default(),
            timeout: None,
            user_agent: concat!("turath-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_files_base_url(mut self, url: impl Into<String>) -> Self {
        self.files_base_url = url.into();
        self
    }

    pub fn with_book_info_convention(mut self, convention: BookInfoConvention) -> Self {
        self.book_info_convention = convention;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
