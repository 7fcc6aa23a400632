//! Decoding of volume search responses into [`Book`]s.
//!
//! Required fields (`items`, `volumeInfo`, `title`) fail the whole parse;
//! the optional `authors` array falls back to [`UNKNOWN_AUTHOR`].

use super::types::{Book, UNKNOWN_AUTHOR};
use crate::{Error, ErrorContext, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct VolumesPage {
    items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    title: String,
    #[serde(default)]
    authors: Option<Vec<String>>,
}

impl From<VolumeInfo> for Book {
    fn from(info: VolumeInfo) -> Self {
        let author = info
            .authors
            .and_then(|authors| authors.into_iter().next())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        Book {
            title: info.title,
            author,
        }
    }
}

/// Parses a raw response body.
///
/// A body that is not JSON at all is a service error; JSON of the wrong
/// shape is a book error.
pub fn parse_books(body: &str) -> Result<Vec<Book>> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        Error::api_service(
            None,
            "response body is not valid JSON",
            ErrorContext::new()
                .with_details(e.to_string())
                .with_source("books"),
        )
    })?;
    parse_books_value(value)
}

/// Parses an already decoded response. Ordering of `items` is preserved.
pub fn parse_books_value(value: Value) -> Result<Vec<Book>> {
    let page: VolumesPage = serde_json::from_value(value).map_err(|e| {
        Error::book(
            "search response has no result list",
            ErrorContext::new()
                .with_field_path("items")
                .with_details(e.to_string())
                .with_source("books"),
        )
    })?;

    let books = page
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Volume>(item)
                .map(|volume| Book::from(volume.volume_info))
                .map_err(|e| {
                    Error::book(
                        "malformed search result",
                        ErrorContext::new()
                            .with_field_path(format!("items[{}]", index))
                            .with_details(e.to_string())
                            .with_source("books"),
                    )
                })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(count = books.len(), "parsed search results");
    Ok(books)
}
