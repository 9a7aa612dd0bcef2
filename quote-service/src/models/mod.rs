pub mod quote;

pub use quote::{Quote, QuoteDraft};
