//! Book search: query a volume search endpoint and decode results into [`Book`]s.

mod client;
mod parse;
mod types;

pub use client::BookClient;
pub use parse::{parse_books, parse_books_value};
pub use types::{Book, BookQuery, PrintType, UNKNOWN_AUTHOR};
