//! Book search types.

use crate::{Error, ErrorContext};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder author for volumes without author metadata.
pub const UNKNOWN_AUTHOR: &str = "Автор не указан";

/// A single search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    pub fn has_known_author(&self) -> bool {
        self.author != UNKNOWN_AUTHOR
    }
}

/// Result-format filter sent as `printType`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintType {
    All,
    #[default]
    Books,
    Magazines,
}

impl PrintType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrintType::All => "all",
            PrintType::Books => "books",
            PrintType::Magazines => "magazines",
        }
    }
}

impl fmt::Display for PrintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PrintType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(PrintType::All),
            "books" => Ok(PrintType::Books),
            "magazines" => Ok(PrintType::Magazines),
            other => Err(Error::configuration_with_context(
                format!("Unknown print type: {}", other),
                ErrorContext::new()
                    .with_field_path("BOOK_PRINT_TYPE")
                    .with_source("books"),
            )),
        }
    }
}

/// One logical search call: the caller's title and the format filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    pub title: String,
    pub print_type: PrintType,
}

impl BookQuery {
    pub fn new(title: impl Into<String>, print_type: PrintType) -> Self {
        Self {
            title: title.into(),
            print_type,
        }
    }

    /// `q`, `key` and `printType`, in that order.
    pub fn query_params<'a>(&'a self, api_key: &'a str) -> [(&'static str, &'a str); 3] {
        [
            ("q", self.title.as_str()),
            ("key", api_key),
            ("printType", self.print_type.as_str()),
        ]
    }
}
