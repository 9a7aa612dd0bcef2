pub mod quotes;

pub use quotes::{QuoteListResponse, QuotePayload};
