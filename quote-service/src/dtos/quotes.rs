use crate::error::AppError;
use crate::models::{Quote, QuoteDraft};
use serde::{Deserialize, Serialize};

/// Body of POST /quotes and PUT /quotes/:id. Both fields are optional at
/// the serde level so a missing field produces a 400 rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct QuotePayload {
    pub quote: Option<String>,
    pub author: Option<String>,
}

impl QuotePayload {
    /// Presence check only: both fields must be supplied and non-empty.
    pub fn into_draft(self) -> Result<QuoteDraft, AppError> {
        let quote = self.quote.unwrap_or_default();
        let author = self.author.unwrap_or_default();

        if quote.trim().is_empty() || author.trim().is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Quote and author are required"
            )));
        }

        Ok(QuoteDraft { quote, author })
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteListResponse {
    pub quotes: Vec<Quote>,
}
