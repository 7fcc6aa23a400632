//! Explicit per-client settings, resolved once at startup.

use super::resolver::{ConfigResolver, Credential, CredentialKind};
use crate::books::PrintType;
use crate::{Error, ErrorContext, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Configuration names read by [`Settings::resolve`].
pub mod keys {
    pub const OPENROUTER_URL: &str = "OPENROUTER_URL";
    pub const OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";
    pub const OPENROUTER_MODEL: &str = "OPENROUTER_MODEL";
    pub const SYSTEM_PROMPT: &str = "SYSTEM_PROMPT";
    /// Older spelling, read when `SYSTEM_PROMPT` is absent.
    pub const SYSTEM_PROMPT_LEGACY: &str = "SYSTEM_PROMT";
    pub const BASE_BOOK_URL: &str = "BASE_BOOK_URL";
    pub const BOOK_API_KEY: &str = "BOOK_API_KEY";
    pub const BOOK_PRINT_TYPE: &str = "BOOK_PRINT_TYPE";
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
}

pub const DEFAULT_MODEL: &str = "arcee-ai/trinity-mini:free";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub url: Credential,
    pub api_key: Credential,
    pub model: String,
    pub system_prompt: String,
    pub reasoning_enabled: bool,
    pub timeout: Duration,
}

impl ChatSettings {
    pub fn new(
        url: impl Into<Arc<str>>,
        api_key: impl Into<Arc<str>>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            url: Credential::new(CredentialKind::Url, keys::OPENROUTER_URL, url),
            api_key: Credential::new(CredentialKind::ApiKey, keys::OPENROUTER_API_KEY, api_key),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: system_prompt.into(),
            reasoning_enabled: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolves URL and key first, then reads the system prompt file.
    pub fn resolve(resolver: &ConfigResolver) -> Result<Self> {
        let url = resolver.resolve_url(keys::OPENROUTER_URL)?;
        let api_key = resolver.resolve_api_key(keys::OPENROUTER_API_KEY)?;
        let prompt_path = resolver
            .resolve_optional(keys::SYSTEM_PROMPT)
            .or_else(|| resolver.resolve_optional(keys::SYSTEM_PROMPT_LEGACY))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "system prompt path is not configured",
                    ErrorContext::new()
                        .with_field_path(keys::SYSTEM_PROMPT)
                        .with_source("config"),
                )
            })?;
        let system_prompt = load_system_prompt(&*prompt_path)?;
        let model = resolver
            .resolve_optional(keys::OPENROUTER_MODEL)
            .map(|m| m.to_string())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            url,
            api_key,
            model,
            system_prompt,
            reasoning_enabled: true,
            timeout: request_timeout(resolver)?,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_reasoning(mut self, enabled: bool) -> Self {
        self.reasoning_enabled = enabled;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct BookSettings {
    /// URL template; `{title}` is replaced with the encoded search title.
    pub url_template: Credential,
    pub api_key: Credential,
    pub print_type: PrintType,
    pub timeout: Duration,
}

impl BookSettings {
    pub fn new(url_template: impl Into<Arc<str>>, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            url_template: Credential::new(CredentialKind::Url, keys::BASE_BOOK_URL, url_template),
            api_key: Credential::new(CredentialKind::ApiKey, keys::BOOK_API_KEY, api_key),
            print_type: PrintType::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn resolve(resolver: &ConfigResolver) -> Result<Self> {
        let url_template = resolver.resolve_url(keys::BASE_BOOK_URL)?;
        let api_key = resolver.resolve_api_key(keys::BOOK_API_KEY)?;
        let print_type = match resolver.resolve_optional(keys::BOOK_PRINT_TYPE) {
            Some(raw) => raw.parse()?,
            None => PrintType::default(),
        };

        Ok(Self {
            url_template,
            api_key,
            print_type,
            timeout: request_timeout(resolver)?,
        })
    }

    pub fn with_print_type(mut self, print_type: PrintType) -> Self {
        self.print_type = print_type;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Settings for both clients.
#[derive(Debug, Clone)]
pub struct Settings {
    pub chat: ChatSettings,
    pub books: BookSettings,
}

impl Settings {
    pub fn resolve(resolver: &ConfigResolver) -> Result<Self> {
        Ok(Self {
            chat: ChatSettings::resolve(resolver)?,
            books: BookSettings::resolve(resolver)?,
        })
    }
}

/// Shared request timeout, `REQUEST_TIMEOUT_SECS` or [`DEFAULT_TIMEOUT`].
pub fn request_timeout(resolver: &ConfigResolver) -> Result<Duration> {
    let Some(raw) = resolver.resolve_optional(keys::REQUEST_TIMEOUT_SECS) else {
        return Ok(DEFAULT_TIMEOUT);
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::configuration_with_context(
            "request timeout must be a positive number of seconds",
            ErrorContext::new()
                .with_field_path(keys::REQUEST_TIMEOUT_SECS)
                .with_details(raw.to_string())
                .with_source("config"),
        )),
    }
}

/// Reads the system prompt; an empty file is a configuration error.
pub fn load_system_prompt(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let prompt = std::fs::read_to_string(path)?;
    if prompt.trim().is_empty() {
        return Err(Error::configuration_with_context(
            "system prompt is empty",
            ErrorContext::new()
                .with_field_path(path.display().to_string())
                .with_source("config"),
        ));
    }
    Ok(prompt)
}
