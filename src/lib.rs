//! # book-advisor
//!
//! Two small async HTTP clients that share one pattern: resolve credentials
//! once, build the request, gate the response on `200 OK`, decode the body
//! into typed values.
//!
//! - [`ChatClient`] sends a system + user prompt to an OpenRouter-style chat
//!   completion endpoint and returns the reply message.
//! - [`BookClient`] queries a Google Books-style volume search and returns
//!   [`Book`] records in server order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use book_advisor::{BookClient, BookSettings, ConfigResolver};
//!
//! #[tokio::main]
//! async fn main() -> book_advisor::Result<()> {
//!     let resolver = ConfigResolver::from_env();
//!     let books = BookClient::new(&BookSettings::resolve(&resolver)?)?;
//!
//!     for book in books.get_books("The Lord of the Rings").await? {
//!         println!("{} by {}", book.title, book.author);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Credential resolution and per-client settings |
//! | [`transport`] | Shared HTTP transport with timeout and status gating |
//! | [`chat`] | Chat completion client and wire types |
//! | [`books`] | Volume search client and response parser |
//! | [`error`] | Error taxonomy |

pub mod books;
pub mod chat;
pub mod config;
pub mod transport;

pub use books::{Book, BookClient, BookQuery, PrintType, UNKNOWN_AUTHOR};
pub use chat::{ChatClient, ChatReply, ChatRequest};
pub use config::{
    BookSettings, ChatSettings, ConfigResolver, ConfigSource, Credential, CredentialKind,
    EnvSource, MapSource, Settings,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
