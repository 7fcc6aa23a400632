//! HTTP transport shared by the chat and book clients.

mod http;

pub use http::{HttpTransport, TransportError};
