//! Generic document store addressed by `(collection, key)`.
//!
//! Two backends are provided: Redis for deployments and an in-process map for
//! tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tokio::sync::RwLock;

use common::{AppError, AppResult};
use domain::Document;

/// Minimal document store capability.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a document, `None` if absent
    async fn get(&self, collection: &str, key: &str) -> AppResult<Option<Document>>;

    /// Write a document, overwriting any existing one
    async fn set(&self, collection: &str, key: &str, document: Document) -> AppResult<()>;

    /// Shallow-merge fields into an existing document.
    /// Fails with `NotFound` if the document does not exist.
    async fn update(&self, collection: &str, key: &str, fields: Document) -> AppResult<()>;

    /// Check store connectivity
    async fn ping(&self) -> AppResult<()>;

    /// Store-assigned timestamp for `createdAt`/`updatedAt`
    fn server_timestamp(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Storage address of a document
fn document_key(collection: &str, key: &str) -> String {
    format!("{}:{}", collection, key)
}

fn merge_fields(target: &mut Document, fields: Document) {
    for (name, value) in fields {
        target.insert(name, value);
    }
}

// =============================================================================
// In-memory backend
// =============================================================================

/// Process-local document store.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents across all collections
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, key: &str) -> AppResult<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents.get(&document_key(collection, key)).cloned())
    }

    async fn set(&self, collection: &str, key: &str, document: Document) -> AppResult<()> {
        let mut documents = self.documents.write().await;
        documents.insert(document_key(collection, key), document);
        Ok(())
    }

    async fn update(&self, collection: &str, key: &str, fields: Document) -> AppResult<()> {
        let mut documents = self.documents.write().await;
        let existing = documents
            .get_mut(&document_key(collection, key))
            .ok_or(AppError::NotFound)?;
        merge_fields(existing, fields);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

// =============================================================================
// Redis backend
// =============================================================================

/// Redis-backed document store. Each document is a JSON string stored under
/// `"{collection}:{key}"`.
#[derive(Clone)]
pub struct RedisDocumentStore {
    connection: ConnectionManager,
}

impl RedisDocumentStore {
    /// Connect to Redis, returning an error instead of panicking.
    pub async fn connect(url: &str) -> AppResult<Self> {
        let client = Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis document store connected");

        Ok(Self { connection })
    }
}

#[async_trait]
impl DocumentStore for RedisDocumentStore {
    async fn get(&self, collection: &str, key: &str) -> AppResult<Option<Document>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(document_key(collection, key)).await?;

        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, collection: &str, key: &str, document: Document) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(&document)?;

        conn.set::<_, _, ()>(document_key(collection, key), json)
            .await?;

        Ok(())
    }

    async fn update(&self, collection: &str, key: &str, fields: Document) -> AppResult<()> {
        let mut existing = self
            .get(collection, key)
            .await?
            .ok_or(AppError::NotFound)?;
        merge_fields(&mut existing, fields);

        let mut conn = self.connection.clone();
        let json = serde_json::to_string(&existing)?;

        // XX: only write if the key still exists, so a concurrent delete is not undone
        let written: Option<String> = redis::cmd("SET")
            .arg(document_key(collection, key))
            .arg(json)
            .arg("XX")
            .query_async(&mut conn)
            .await?;

        written.map(|_| ()).ok_or(AppError::NotFound)
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
