//! Book search client.

use super::parse::parse_books;
use super::types::{Book, BookQuery, PrintType};
use crate::config::{BookSettings, Credential};
use crate::transport::HttpTransport;
use crate::{Error, ErrorContext, Result};

const TITLE_PLACEHOLDER: &str = "{title}";

/// Client for a Google Books-style volume search endpoint.
#[derive(Debug, Clone)]
pub struct BookClient {
    transport: HttpTransport,
    url_template: Credential,
    api_key: Credential,
    print_type: PrintType,
}

impl BookClient {
    pub fn new(settings: &BookSettings) -> Result<Self> {
        Ok(Self {
            transport: HttpTransport::new(settings.timeout)?,
            url_template: settings.url_template.clone(),
            api_key: settings.api_key.clone(),
            print_type: settings.print_type,
        })
    }

    /// Searches by title and returns one [`Book`] per result, in server order.
    pub async fn get_books(&self, title: &str) -> Result<Vec<Book>> {
        let query = self.build_request(title);
        let url = self.request_url(&query.title)?;
        let request = self
            .transport
            .get_with_query(&url, &query.query_params(self.api_key.expose()));
        let body = self.transport.execute(request, "books").await?;
        parse_books(&body)
    }

    pub fn build_request(&self, title: &str) -> BookQuery {
        BookQuery::new(title, self.print_type)
    }

    /// Fills `{title}` in the configured template with the percent-encoded title.
    pub fn request_url(&self, title: &str) -> Result<String> {
        let template = self.url_template.expose();
        let filled = if template.contains(TITLE_PLACEHOLDER) {
            // form encoding turns spaces into '+', which is only valid in a query
            let encoded = url::form_urlencoded::byte_serialize(title.as_bytes())
                .collect::<String>()
                .replace('+', "%20");
            template.replace(TITLE_PLACEHOLDER, &encoded)
        } else {
            template.to_string()
        };

        let url = url::Url::parse(&filled).map_err(|e| {
            Error::configuration_with_context(
                "book URL template does not form a valid URL",
                ErrorContext::new()
                    .with_field_path(self.url_template.name())
                    .with_details(e.to_string())
                    .with_source("books"),
            )
        })?;
        Ok(url.into())
    }

    pub fn print_type(&self) -> PrintType {
        self.print_type
    }
}
