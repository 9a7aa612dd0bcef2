use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored quote. The id is assigned by the store on creation and is
/// opaque to the route layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    pub id: String,
    pub quote: String,
    pub author: String,
}

/// The two caller-supplied fields of a quote, before the store has
/// assigned an id.
#[derive(Debug, Clone)]
pub struct QuoteDraft {
    pub quote: String,
    pub author: String,
}

impl Quote {
    pub fn new(draft: QuoteDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            quote: draft.quote,
            author: draft.author,
        }
    }
}
