//! Configuration: credential resolution and the settings each client is built from.

mod resolver;
mod settings;

pub use resolver::{ConfigResolver, ConfigSource, Credential, CredentialKind, EnvSource, MapSource};
pub use settings::{
    keys, load_system_prompt, request_timeout, BookSettings, ChatSettings, Settings, DEFAULT_MODEL,
    DEFAULT_TIMEOUT,
};
