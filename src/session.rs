use std::sync::Arc;

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::history::{HistoryEntry, HistoryLog};
use crate::lang::Lang;
use crate::sign;
use crate::translator::TranslationClient;

/// Validate, sign, translate, record. The history write never fails the call.
pub struct Session {
    client: TranslationClient,
    history: Arc<HistoryLog>,
}

impl Session {
    pub fn new(client: TranslationClient, history: Arc<HistoryLog>) -> Self {
        Self { client, history }
    }

    pub async fn translate(&self, text: &str, from: Lang, to: Lang, credentials: &Credentials) -> Result<String> {
        credentials.ensure_complete()?;
        let query = text.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }
        if !to.is_valid_target() {
            return Err(Error::InvalidTargetLanguage(to.code().to_string()));
        }

        let request = sign::build(query, from, to, credentials)?;
        tracing::debug!("Translating {} chars {} -> {}", query.chars().count(), from, to);
        let translated = self.client.translate(&request).await.into_result()?;

        if let Err(e) = self.history.append(HistoryEntry::new(query, from, to, translated.as_str())) {
            tracing::warn!("Failed to save history: {}", e);
        }
        Ok(translated)
    }
}
