use crate::core::transform::transform_slice;
use crate::domain::model::{BatchResult, CoreDescriptor, IndexOutcome, RedactionSet};
use crate::domain::ports::{SearchIndex, Storage};
use crate::utils::error::Result;
use serde_json::Value;

/// 組合整條管線：讀取檔案 → 轉換 → 提交，以及讀取端的 describe → 快照。
pub struct IndexingEngine<B: SearchIndex, S: Storage> {
    backend: B,
    storage: S,
    redaction: RedactionSet,
}

impl<B: SearchIndex, S: Storage> IndexingEngine<B, S> {
    pub fn new(backend: B, storage: S, redaction: RedactionSet) -> Self {
        Self {
            backend,
            storage,
            redaction,
        }
    }

    /// 擷取 core 中繼資料與樣本文件，寫入快照檔（每次執行覆寫）。
    pub async fn describe_to_file(
        &self,
        sample_size: usize,
        snapshot_path: &str,
    ) -> Result<CoreDescriptor> {
        tracing::info!("🔌 Checking Solr availability...");
        self.backend.ping().await?;

        let descriptor = self.backend.describe(sample_size).await?;
        tracing::info!(
            "📊 Core '{}': {} documents, {} bytes, {} sample documents",
            descriptor.core_name,
            descriptor.num_documents,
            descriptor.index_size_bytes,
            descriptor.sample_documents.len()
        );

        let body = serde_json::to_vec_pretty(&descriptor)?;
        self.storage.write_file(snapshot_path, &body).await?;
        tracing::info!("💾 Metadata snapshot saved to: {}", snapshot_path);

        Ok(descriptor)
    }

    /// 轉換巢狀輸入並提交；`raw` 模式則原封不動送出。
    pub async fn index_file(&self, input: &str, raw: bool, commit: bool) -> Result<IndexOutcome> {
        tracing::info!("📥 Reading input file: {}", input);
        let bytes = self.storage.read_file(input).await?;

        if raw {
            let payload: Value = serde_json::from_slice(&bytes)?;
            tracing::info!("📤 Submitting payload as-is (raw mode)");
            return self.backend.submit_raw(&payload, commit).await;
        }

        let batch = self.transform_bytes(&bytes)?;
        tracing::info!("📤 Submitting {} documents", batch.accepted.len());
        self.backend.submit(&batch.accepted, commit).await
    }

    /// 僅轉換，將平面文件陣列寫到輸出檔。
    pub async fn transform_to_file(&self, input: &str, output: &str) -> Result<BatchResult> {
        let bytes = self.storage.read_file(input).await?;
        let batch = self.transform_bytes(&bytes)?;

        let body = serde_json::to_vec_pretty(&batch.accepted)?;
        self.storage.write_file(output, &body).await?;
        tracing::info!("💾 Transformed output saved to: {}", output);

        Ok(batch)
    }

    fn transform_bytes(&self, bytes: &[u8]) -> Result<BatchResult> {
        let batch = transform_slice(bytes, &self.redaction)?;
        for rejection in &batch.rejected {
            tracing::warn!(
                "🔶 Record {} rejected: {}",
                rejection.index,
                rejection.reason
            );
        }
        tracing::info!(
            "🔄 Transformed {} records ({} rejected)",
            batch.accepted.len(),
            batch.rejected.len()
        );
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FlatDocument;
    use crate::utils::error::SolrEtlError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                SolrEtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MockBackend {
        submissions: Arc<Mutex<Vec<(Vec<FlatDocument>, bool)>>>,
        raw_submissions: Arc<Mutex<Vec<(Value, bool)>>>,
        pings: Arc<Mutex<usize>>,
    }

    #[async_trait]
    impl SearchIndex for MockBackend {
        async fn ping(&self) -> Result<()> {
            *self.pings.lock().await += 1;
            Ok(())
        }

        async fn describe(&self, sample_size: usize) -> Result<CoreDescriptor> {
            let sample = json!({"id": "s1", "name": "Sample"});
            let docs = vec![sample.as_object().unwrap().clone()];
            Ok(CoreDescriptor {
                core_name: "mycore".to_string(),
                index_size_bytes: 2048,
                num_documents: 7,
                sample_documents: docs.into_iter().take(sample_size).collect(),
            })
        }

        async fn submit(&self, documents: &[FlatDocument], commit: bool) -> Result<IndexOutcome> {
            self.submissions
                .lock()
                .await
                .push((documents.to_vec(), commit));
            Ok(IndexOutcome {
                submitted_count: documents.len(),
                success: true,
                server_message: None,
            })
        }

        async fn submit_raw(&self, payload: &Value, commit: bool) -> Result<IndexOutcome> {
            self.raw_submissions
                .lock()
                .await
                .push((payload.clone(), commit));
            Ok(IndexOutcome {
                submitted_count: 1,
                success: true,
                server_message: None,
            })
        }
    }

    fn complex_payload() -> Vec<u8> {
        serde_json::to_vec(&json!({"data": {"Index": [{"Documents": [
            {"document_id": "d1", "fieldTypes": [{"fieldName": "name", "value": "Alice"}]},
            {"fieldTypes": []}
        ]}]}}))
        .unwrap()
    }

    #[tokio::test]
    async fn test_index_file_submits_accepted_documents() {
        let storage = MockStorage::new();
        storage.put_file("input.json", &complex_payload()).await;
        let backend = MockBackend::default();
        let engine = IndexingEngine::new(backend.clone(), storage, RedactionSet::default());

        let outcome = engine.index_file("input.json", false, true).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.submitted_count, 1);

        let submissions = backend.submissions.lock().await;
        assert_eq!(submissions.len(), 1);
        let (docs, commit) = &submissions[0];
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id().unwrap(), &json!("d1"));
        assert!(commit);
    }

    #[tokio::test]
    async fn test_index_file_raw_mode_passes_payload_through() {
        let payload = json!([{"id": "x", "name": "untouched"}]);
        let storage = MockStorage::new();
        storage
            .put_file("raw.json", &serde_json::to_vec(&payload).unwrap())
            .await;
        let backend = MockBackend::default();
        let engine = IndexingEngine::new(backend.clone(), storage, RedactionSet::default());

        engine.index_file("raw.json", true, false).await.unwrap();

        let raw_submissions = backend.raw_submissions.lock().await;
        assert_eq!(raw_submissions.len(), 1);
        assert_eq!(raw_submissions[0].0, payload);
        assert!(!raw_submissions[0].1);
        assert!(backend.submissions.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_index_file_fails_fast_on_invalid_json() {
        let storage = MockStorage::new();
        storage.put_file("bad.json", b"{nope").await;
        let backend = MockBackend::default();
        let engine = IndexingEngine::new(backend.clone(), storage, RedactionSet::default());

        let result = engine.index_file("bad.json", false, true).await;

        assert!(matches!(result, Err(SolrEtlError::EncodingError(_))));
        assert!(backend.submissions.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_describe_to_file_writes_snapshot() {
        let storage = MockStorage::new();
        let backend = MockBackend::default();
        let engine =
            IndexingEngine::new(backend.clone(), storage.clone(), RedactionSet::default());

        let descriptor = engine
            .describe_to_file(2, "solr_metadata.json")
            .await
            .unwrap();

        assert_eq!(descriptor.core_name, "mycore");
        assert_eq!(*backend.pings.lock().await, 1);

        let snapshot = storage.get_file("solr_metadata.json").await.unwrap();
        let parsed: Value = serde_json::from_slice(&snapshot).unwrap();
        assert_eq!(parsed["core_name"], json!("mycore"));
        assert_eq!(parsed["num_documents"], json!(7));
        assert_eq!(parsed["index_size_bytes"], json!(2048));
        assert!(parsed["sample_documents"].is_array());
    }

    #[tokio::test]
    async fn test_transform_to_file_writes_accepted_array() {
        let storage = MockStorage::new();
        storage.put_file("input.json", &complex_payload()).await;
        let backend = MockBackend::default();
        let engine =
            IndexingEngine::new(backend.clone(), storage.clone(), RedactionSet::default());

        let batch = engine
            .transform_to_file("input.json", "solr_fixed.json")
            .await
            .unwrap();

        assert_eq!(batch.accepted.len(), 1);
        assert_eq!(batch.rejected.len(), 1);

        let output = storage.get_file("solr_fixed.json").await.unwrap();
        let parsed: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed, json!([{"id": "d1", "name": "Alice"}]));
        // 提交不應該發生
        assert!(backend.submissions.lock().await.is_empty());
    }
}
