use crate::domain::model::{CoreDescriptor, Credentials, FlatDocument, IndexOutcome};
use crate::domain::ports::{ConnectionProvider, SearchIndex};
use crate::utils::error::{Result, SolrEtlError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// reqwest 實作的 Solr 客戶端。單一請求、有界超時，不做重試也不分批。
pub struct SolrClient {
    client: Client,
    base_url: String,
    core: String,
    credentials: Option<Credentials>,
    timeout: Duration,
}

impl SolrClient {
    pub fn new(config: &impl ConnectionProvider) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}:{}/solr", config.hostname(), config.port()),
            core: config.core_name().to_string(),
            credentials: config.credentials(),
            timeout: Duration::from_secs(config.timeout_seconds()),
        }
    }

    fn get(&self, url: String) -> RequestBuilder {
        self.with_auth(self.client.get(url).timeout(self.timeout))
    }

    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        }
    }

    async fn core_status(&self) -> Result<(u64, u64)> {
        let url = format!("{}/admin/cores", self.base_url);
        let response = self
            .get(url)
            .query(&[("action", "STATUS"), ("core", self.core.as_str()), ("wt", "json")])
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response.json().await?;

        // core 不存在時 status 區塊裡沒有對應的 index 資訊
        let index = payload
            .get("status")
            .and_then(|status| status.get(&self.core))
            .and_then(|core| core.get("index"))
            .and_then(Value::as_object)
            .ok_or_else(|| SolrEtlError::CoreNotFoundError {
                core: self.core.clone(),
            })?;

        let size = index.get("sizeInBytes").and_then(Value::as_u64).unwrap_or(0);
        let docs = index.get("numDocs").and_then(Value::as_u64).unwrap_or(0);
        Ok((size, docs))
    }

    async fn sample(&self, rows: usize) -> Result<Vec<Map<String, Value>>> {
        let url = format!("{}/{}/select", self.base_url, self.core);
        let rows = rows.to_string();
        let response = self
            .get(url)
            .query(&[("q", "*:*"), ("wt", "json"), ("rows", rows.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response.json().await?;
        let docs = payload
            .get("response")
            .and_then(|r| r.get("docs"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        Ok(docs
            .iter()
            .filter_map(Value::as_object)
            .map(strip_system_fields)
            .collect())
    }

    async fn post_update<T: Serialize + ?Sized>(
        &self,
        body: &T,
        submitted_count: usize,
        commit: bool,
    ) -> Result<IndexOutcome> {
        let url = format!("{}/{}/update", self.base_url, self.core);
        tracing::debug!("📤 POST {} (commit={})", url, commit);

        let response = self
            .with_auth(self.client.post(url).timeout(self.timeout))
            .query(&[("commit", if commit { "true" } else { "false" })])
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::error!("❌ Update rejected with status {}: {}", status, text);
            return Err(SolrEtlError::IndexRejectionError {
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::debug!("📤 Update accepted with status {}", status);
        Ok(IndexOutcome {
            submitted_count,
            success: true,
            server_message: if text.trim().is_empty() { None } else { Some(text) },
        })
    }
}

#[async_trait]
impl SearchIndex for SolrClient {
    async fn ping(&self) -> Result<()> {
        let url = format!("{}/admin/info/system", self.base_url);
        self.get(url)
            .query(&[("wt", "json")])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn describe(&self, sample_size: usize) -> Result<CoreDescriptor> {
        let (index_size_bytes, num_documents) = self.core_status().await?;
        let sample_documents = self.sample(sample_size).await?;

        Ok(CoreDescriptor {
            core_name: self.core.clone(),
            index_size_bytes,
            num_documents,
            sample_documents,
        })
    }

    async fn submit(&self, documents: &[FlatDocument], commit: bool) -> Result<IndexOutcome> {
        self.post_update(documents, documents.len(), commit).await
    }

    async fn submit_raw(&self, payload: &Value, commit: bool) -> Result<IndexOutcome> {
        let count = match payload {
            Value::Array(items) => items.len(),
            _ => 1,
        };
        self.post_update(payload, count, commit).await
    }
}

// Reserved system fields (leading underscore) never leave the sample.
fn strip_system_fields(doc: &Map<String, Value>) -> Map<String, Value> {
    doc.iter()
        .filter(|(key, _)| !key.starts_with('_'))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
