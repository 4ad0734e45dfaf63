use crate::config::API_VERSION;
use crate::query::QueryParameters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Page or volume label that upstream sends either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageLabel {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub info: String,
}

/// `id` and `name` are required; an empty `meta` object is not a book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookMeta {
    #[serde(default)]
    pub author_id: u64,
    #[serde(default)]
    pub author_page_start: u64,
    #[serde(default)]
    pub cat_id: u64,
    #[serde(default)]
    pub date_built: i64,
    pub id: u64,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub info_long: String,
    pub name: String,
    #[serde(default)]
    pub printed: i64,
    #[serde(rename = "type", default)]
    pub kind: i64,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookHeading {
    pub level: u32,
    pub page: u64,
    pub title: String,
}

/// Navigational index served by the `/book` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookIndexes {
    pub headings: Vec<BookHeading>,
    pub non_author: Vec<Value>,
    /// Page number to the indexes of headings that start on it.
    pub page_headings: BTreeMap<String, Vec<u64>>,
    pub page_map: Vec<String>,
    /// `"<vol>,<printed page>"` to logical page.
    pub print_pg_to_pg: BTreeMap<String, u64>,
    pub volume_bounds: BTreeMap<String, (u64, u64)>,
    pub volumes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookInfo {
    pub meta: BookMeta,
    pub indexes: BookIndexes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookFileMeta {
    pub author_id: u64,
    pub cat_id: u64,
    pub date_built: i64,
    pub details: String,
    pub has_pdf: bool,
    pub id: u64,
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookFileIndexes {
    pub hadiths: BTreeMap<String, u64>,
    pub headings: Vec<BookHeading>,
    pub pdf_base: String,
    pub pdfs: BTreeMap<String, String>,
    pub volumes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedIndexes {
    pub hadith_max: Option<String>,
    pub hadith_pages: BTreeMap<String, String>,
    pub page_headings: BTreeMap<String, Vec<u64>>,
    pub page_map: Vec<Option<String>>,
    pub print_pg_to_pg: BTreeMap<String, u64>,
    pub volume_bounds: BTreeMap<String, (u64, u64)>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookPage {
    pub page: Option<PageLabel>,
    pub text: String,
    pub vol: Option<String>,
}

/// Whole-book snapshot served from the file origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookFile {
    pub meta: BookFileMeta,
    pub indexes: BookFileIndexes,
    pub indexes_generated: GeneratedIndexes,
    pub pages: Vec<BookPage>,
}

/// Decoded form of the JSON string upstream embeds in `meta` fields.
///
/// Every field is optional because upstream omits them freely; keys this type
/// does not know about are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vol: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub meta: PageMetadata,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cat_id: Option<u64>,
    pub meta: PageMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snip: Option<String>,
    #[serde(default)]
    pub text: String,
    /// Hit keys not modelled above, kept as upstream sent them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub count: u64,
    pub data: Vec<SearchHit>,
}

/// Extra payloads the `/book` endpoint can attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Include {
    Indexes,
}

impl Include {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Indexes => "indexes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    PageId,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PageId => "page_id",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub author: Option<u64>,
    pub book: Option<u64>,
    pub category: Option<u64>,
    /// Result page cursor, passed through to upstream as-is.
    pub page: Option<u64>,
    pub precision: Option<u64>,
    pub sort_field: Option<SortField>,
}

impl SearchOptions {
    /// Wire parameters for a `/search` request. Category `0` means "any" and is dropped.
    pub fn to_query(&self, query: &str) -> QueryParameters {
        QueryParameters::new()
            .with_opt("author", self.author)
            .with_opt("book", self.book)
            .with_opt("cat_id", self.category.filter(|category| *category != 0))
            .with_opt("page", self.page)
            .with_opt("precision", self.precision)
            .with_opt("sort", self.sort_field.map(SortField::as_str))
            .with("q", query)
            .with("ver", API_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryValue;
    use serde_json::json;

    #[test]
    fn search_options_use_wire_names() {
        let options = SearchOptions {
            category: Some(2),
            sort_field: Some(SortField::PageId),
            ..Default::default()
        };

        let params = options.to_query("query");
        let keys: Vec<&str> = params.keys().collect();
        assert_eq!(keys, vec!["cat_id", "q", "sort", "ver"]);
        assert_eq!(params.get("cat_id"), Some(&QueryValue::Unsigned(2)));
        assert_eq!(params.get("q"), Some(&QueryValue::Text("query".to_string())));
        assert_eq!(params.get("sort"), Some(&QueryValue::Text("page_id".to_string())));
        assert_eq!(params.get("ver"), Some(&QueryValue::Unsigned(u64::from(API_VERSION))));
    }

    #[test]
    fn zero_category_is_dropped_but_zero_page_is_kept() {
        let options = SearchOptions {
            category: Some(0),
            page: Some(0),
            precision: Some(1),
            author: Some(1207),
            ..Default::default()
        };

        let params = options.to_query("x");
        assert!(!params.contains_key("cat_id"));
        assert_eq!(params.get("page"), Some(&QueryValue::Unsigned(0)));
        assert_eq!(params.get("precision"), Some(&QueryValue::Unsigned(1)));
        assert_eq!(params.get("author"), Some(&QueryValue::Unsigned(1207)));
        assert!(!params.contains_key("book"));
    }

    #[test]
    fn default_options_only_send_query_and_version() {
        let params = SearchOptions::default().to_query("q");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn page_metadata_keeps_unknown_keys() {
        let meta: PageMetadata = serde_json::from_value(json!({
            "author_name": "ابن المبرد",
            "headings": [],
            "page": 141,
            "page_id": 141,
            "vol": "1",
            "foo": "abcd"
        }))
        .unwrap();

        assert_eq!(meta.page, Some(PageLabel::Number(141)));
        assert_eq!(meta.headings, Some(Vec::new()));
        assert_eq!(meta.extra.get("foo"), Some(&json!("abcd")));
        assert!(meta.book_name.is_none());
    }

    #[test]
    fn book_pages_accept_numeric_and_empty_labels() {
        let pages: Vec<BookPage> = serde_json::from_value(json!([
            {"page": "", "text": "intro", "vol": ""},
            {"page": 87, "text": "body", "vol": "1"},
            {"text": "bare"}
        ]))
        .unwrap();

        assert_eq!(pages[0].page, Some(PageLabel::Text(String::new())));
        assert_eq!(pages[1].page, Some(PageLabel::Number(87)));
        assert_eq!(pages[2].page, None);
        assert_eq!(pages[2].vol, None);
    }

    #[test]
    fn book_meta_type_field_is_renamed() {
        let meta: BookMeta = serde_json::from_value(json!({"id": 147927, "type": 5, "name": "n"})).unwrap();
        assert_eq!(meta.kind, 5);
        assert_eq!(meta.id, 147927);
        assert_eq!(serde_json::to_value(&meta).unwrap()["type"], json!(5));
    }

    #[test]
    fn book_meta_requires_identity() {
        assert!(serde_json::from_value::<BookMeta>(json!({})).is_err());
        assert!(serde_json::from_value::<BookMeta>(json!({"id": 1})).is_err());
        assert!(serde_json::from_value::<BookMeta>(json!({"id": 1, "name": "n"})).is_ok());
    }

    #[test]
    fn volume_bounds_decode_from_pairs() {
        let indexes: BookIndexes = serde_json::from_value(json!({
            "volume_bounds": {"1": [1, 67]},
            "volumes": ["1"]
        }))
        .unwrap();
        assert_eq!(indexes.volume_bounds.get("1"), Some(&(1, 67)));
    }
}
