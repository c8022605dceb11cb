//! Baidu machine-translation desktop client.
//!
//! The library covers everything below the window: credentials, request
//! signing, the HTTP call and its response, and the bounded history file.

pub mod clipboard;
pub mod config;
pub mod credentials;
pub mod error;
pub mod history;
pub mod lang;
pub mod session;
pub mod sign;
pub mod translator;
pub mod worker;

pub use credentials::{CredentialStore, Credentials};
pub use error::{Error, Result};
pub use history::{HistoryEntry, HistoryLog};
pub use lang::Lang;
pub use session::Session;
pub use sign::TranslationRequest;
pub use translator::{TranslationClient, TranslationResult};
