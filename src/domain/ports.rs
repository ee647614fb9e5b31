use crate::domain::model::{CoreDescriptor, Credentials, FlatDocument, IndexOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConnectionProvider: Send + Sync {
    fn hostname(&self) -> &str;
    fn port(&self) -> u16;
    fn core_name(&self) -> &str;
    fn credentials(&self) -> Option<Credentials>;
    fn timeout_seconds(&self) -> u64;
}

/// Write-and-introspect surface of the remote search index.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Liveness probe against the server, independent of any core.
    async fn ping(&self) -> Result<()>;

    /// Core metadata plus up to `sample_size` documents from the default
    /// query, system fields stripped.
    async fn describe(&self, sample_size: usize) -> Result<CoreDescriptor>;

    /// Submit a batch of flat documents in one write request. No internal
    /// retry and no internal chunking; callers compose multiple calls if
    /// they need backpressure.
    async fn submit(&self, documents: &[FlatDocument], commit: bool) -> Result<IndexOutcome>;

    /// Submit an already-index-ready payload unchanged.
    async fn submit_raw(&self, payload: &Value, commit: bool) -> Result<IndexOutcome>;
}
