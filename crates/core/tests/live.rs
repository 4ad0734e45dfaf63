//! End-to-end checks against the public service. Run with `cargo test -- --ignored`.

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use turath_core::{ClientConfig, PageLabel, SearchOptions, TurathClient};

fn live_client() -> TurathClient {
    TurathClient::new(ClientConfig::default().with_timeout(Duration::from_secs(10)))
        .expect("client should build")
}

fn unlikely_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_millis() as u64
}

#[tokio::test]
#[ignore = "hits the live service"]
async fn author_lookup() {
    let author = live_client().author(1207).await.expect("author should exist");
    assert!(!author.info.is_empty());
}

#[tokio::test]
#[ignore = "hits the live service"]
async fn missing_author_is_not_found() {
    let id = unlikely_id();
    let error = live_client().author(id).await.unwrap_err();
    assert_eq!(error.to_string(), format!("Author {id} not found"));
}

#[tokio::test]
#[ignore = "hits the live service"]
async fn page_lookup_decodes_metadata() {
    let page = live_client().page(17616, 141).await.expect("page should exist");
    assert_eq!(page.meta.page_id, Some(141));
    assert_eq!(page.meta.page, Some(PageLabel::Number(128)));
    assert_eq!(page.meta.vol.as_deref(), Some("1"));
    assert!(!page.text.is_empty());
}

#[tokio::test]
#[ignore = "hits the live service"]
async fn missing_page_is_not_found() {
    let id = unlikely_id();
    let error = live_client().page(id, id).await.unwrap_err();
    assert_eq!(error.to_string(), format!("Book {id}, page {id} not found"));
}

#[tokio::test]
#[ignore = "hits the live service"]
async fn book_file_lookup() {
    let book = live_client().book_file(17616).await.expect("book file should exist");
    assert_eq!(book.meta.id, 17616);
    assert_eq!(book.meta.author_id, 1207);
    assert_eq!(book.pages.len(), 590);
}

#[tokio::test]
#[ignore = "hits the live service"]
async fn missing_book_file_is_not_found() {
    let id = unlikely_id();
    let error = live_client().book_file(id).await.unwrap_err();
    assert!(error.is_not_found());
}

#[tokio::test]
#[ignore = "hits the live service"]
async fn book_info_lookup() {
    let book = live_client().book_info(147927).await.expect("book should exist");
    assert_eq!(book.indexes.volumes, vec!["1".to_string()]);
}

#[tokio::test]
#[ignore = "hits the live service"]
async fn search_returns_hits_with_metadata() {
    let results = live_client()
        .search("الحديث", &SearchOptions::default())
        .await
        .expect("search should succeed");
    assert!(results.count > 0);
    assert!(results.data.len() as u64 <= results.count);
}
