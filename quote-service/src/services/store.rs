use crate::error::AppError;
use crate::models::{Quote, QuoteDraft};
use async_trait::async_trait;
use rand::Rng;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::RwLock;

/// Contract of the records collaborator. The route layer only ever talks
/// to this trait; the backend is chosen at startup.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    async fn quotes(&self) -> Result<Vec<Quote>, AppError>;
    async fn quote(&self, id: &str) -> Result<Option<Quote>, AppError>;
    async fn create_quote(&self, draft: QuoteDraft) -> Result<Quote, AppError>;
    async fn update_quote(&self, quote: Quote) -> Result<(), AppError>;
    async fn delete_quote(&self, quote: Quote) -> Result<(), AppError>;
    async fn random_quote(&self) -> Result<Option<Quote>, AppError>;

    /// Liveness probe for the /health endpoint.
    async fn health_check(&self) -> Result<(), AppError>;
}

fn pick_random(quotes: &[Quote]) -> Option<Quote> {
    if quotes.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..quotes.len());
    Some(quotes[index].clone())
}

fn replace_quote(quotes: &mut [Quote], updated: Quote) -> Result<(), AppError> {
    match quotes.iter_mut().find(|q| q.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            Ok(())
        }
        None => Err(AppError::NotFound(anyhow::anyhow!("Quote Not Found"))),
    }
}

fn remove_quote(quotes: &mut Vec<Quote>, id: &str) -> Result<(), AppError> {
    let before = quotes.len();
    quotes.retain(|q| q.id != id);
    if quotes.len() == before {
        return Err(AppError::NotFound(anyhow::anyhow!("Quote Not Found")));
    }
    Ok(())
}

/// Volatile backend, the default in dev and tests.
pub struct MemoryStore {
    quotes: RwLock<Vec<Quote>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            quotes: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteStore for MemoryStore {
    async fn quotes(&self) -> Result<Vec<Quote>, AppError> {
        Ok(self.quotes.read().await.clone())
    }

    async fn quote(&self, id: &str) -> Result<Option<Quote>, AppError> {
        Ok(self.quotes.read().await.iter().find(|q| q.id == id).cloned())
    }

    async fn create_quote(&self, draft: QuoteDraft) -> Result<Quote, AppError> {
        let quote = Quote::new(draft);
        self.quotes.write().await.push(quote.clone());
        Ok(quote)
    }

    async fn update_quote(&self, quote: Quote) -> Result<(), AppError> {
        replace_quote(&mut self.quotes.write().await, quote)
    }

    async fn delete_quote(&self, quote: Quote) -> Result<(), AppError> {
        remove_quote(&mut *self.quotes.write().await, &quote.id)
    }

    async fn random_quote(&self) -> Result<Option<Quote>, AppError> {
        Ok(pick_random(&self.quotes.read().await))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Durable backend: the full collection lives in one JSON file that is
/// rewritten after every mutation. The lock only guards against torn
/// writes within this process.
pub struct JsonFileStore {
    path: PathBuf,
    quotes: RwLock<Vec<Quote>>,
}

impl JsonFileStore {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let quotes = if path.exists() {
            let data = fs::read(&path).await?;
            serde_json::from_slice(&data)?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            quotes: RwLock::new(quotes),
        })
    }

    async fn flush(&self, quotes: &[Quote]) -> Result<(), AppError> {
        let data = serde_json::to_vec_pretty(quotes)?;
        fs::write(&self.path, data).await?;
        Ok(())
    }
}

#[async_trait]
impl QuoteStore for JsonFileStore {
    async fn quotes(&self) -> Result<Vec<Quote>, AppError> {
        Ok(self.quotes.read().await.clone())
    }

    async fn quote(&self, id: &str) -> Result<Option<Quote>, AppError> {
        Ok(self.quotes.read().await.iter().find(|q| q.id == id).cloned())
    }

    async fn create_quote(&self, draft: QuoteDraft) -> Result<Quote, AppError> {
        let quote = Quote::new(draft);
        let mut quotes = self.quotes.write().await;
        quotes.push(quote.clone());
        self.flush(&quotes).await?;
        Ok(quote)
    }

    async fn update_quote(&self, quote: Quote) -> Result<(), AppError> {
        let mut quotes = self.quotes.write().await;
        replace_quote(&mut quotes, quote)?;
        self.flush(&quotes).await
    }

    async fn delete_quote(&self, quote: Quote) -> Result<(), AppError> {
        let mut quotes = self.quotes.write().await;
        remove_quote(&mut quotes, &quote.id)?;
        self.flush(&quotes).await
    }

    async fn random_quote(&self) -> Result<Option<Quote>, AppError> {
        Ok(pick_random(&self.quotes.read().await))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::metadata(parent).await?;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn draft(quote: &str, author: &str) -> QuoteDraft {
        QuoteDraft {
            quote: quote.to_string(),
            author: author.to_string(),
        }
    }

    #[tokio::test]
    async fn memory_store_create_and_get() {
        let store = MemoryStore::new();

        let created = store
            .create_quote(draft("Stay hungry, stay foolish.", "Stewart Brand"))
            .await
            .expect("create failed");
        assert!(!created.id.is_empty());

        let fetched = store.quote(&created.id).await.expect("get failed");
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn memory_store_get_unknown_id_is_none() {
        let store = MemoryStore::new();
        let fetched = store.quote("no-such-id").await.expect("get failed");
        assert_eq!(fetched, None);
    }

    #[tokio::test]
    async fn memory_store_update_overwrites_fields() {
        let store = MemoryStore::new();
        let mut created = store
            .create_quote(draft("First draft", "Unknown"))
            .await
            .expect("create failed");

        created.quote = "Second draft".to_string();
        created.author = "Known".to_string();
        store
            .update_quote(created.clone())
            .await
            .expect("update failed");

        let fetched = store.quote(&created.id).await.expect("get failed");
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn memory_store_update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let quote = Quote {
            id: "missing".to_string(),
            quote: "x".to_string(),
            author: "y".to_string(),
        };

        assert!(matches!(
            store.update_quote(quote).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn memory_store_delete_removes_quote() {
        let store = MemoryStore::new();
        let created = store
            .create_quote(draft("Ephemeral", "Nobody"))
            .await
            .expect("create failed");

        store
            .delete_quote(created.clone())
            .await
            .expect("delete failed");

        assert_eq!(store.quote(&created.id).await.expect("get failed"), None);
        assert!(store.quotes().await.expect("list failed").is_empty());
    }

    #[tokio::test]
    async fn memory_store_random_on_empty_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.random_quote().await.expect("random failed"), None);
    }

    #[tokio::test]
    async fn memory_store_random_returns_a_member() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .create_quote(draft(&format!("Quote {}", i), "Author"))
                .await
                .expect("create failed");
        }

        let all = store.quotes().await.expect("list failed");
        let picked = store
            .random_quote()
            .await
            .expect("random failed")
            .expect("store is not empty");
        assert!(all.contains(&picked));
    }

    #[tokio::test]
    async fn file_store_persists_across_reopen() {
        let path = std::env::temp_dir().join(format!("quotes-test-{}.json", Uuid::new_v4()));

        let created = {
            let store = JsonFileStore::new(&path).await.expect("open failed");
            store
                .create_quote(draft("Written to disk", "The Test"))
                .await
                .expect("create failed")
        };

        let reopened = JsonFileStore::new(&path).await.expect("reopen failed");
        let fetched = reopened.quote(&created.id).await.expect("get failed");
        assert_eq!(fetched, Some(created));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn file_store_delete_is_persisted() {
        let path = std::env::temp_dir().join(format!("quotes-test-{}.json", Uuid::new_v4()));

        {
            let store = JsonFileStore::new(&path).await.expect("open failed");
            let created = store
                .create_quote(draft("Soon gone", "The Test"))
                .await
                .expect("create failed");
            store.delete_quote(created).await.expect("delete failed");
        }

        let reopened = JsonFileStore::new(&path).await.expect("reopen failed");
        assert!(reopened.quotes().await.expect("list failed").is_empty());

        let _ = tokio::fs::remove_file(&path).await;
    }
}
