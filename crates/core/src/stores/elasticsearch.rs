use crate::traits::DocumentSink;
use crate::{IndexDocument, PublishError, PublishTarget};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use url::Url;

const BACKEND: &str = "elasticsearch";

pub struct ElasticsearchSink {
    client: Arc<Client>,
    endpoint: Url,
    index_name: String,
}

impl ElasticsearchSink {
    pub fn new(endpoint: Url, index_name: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint, index_name)
    }

    pub fn with_client(client: Client, endpoint: Url, index_name: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            endpoint,
            index_name: index_name.into(),
        }
    }

    pub fn document_url(&self, target: &PublishTarget) -> Result<Url, PublishError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| PublishError::InvalidTarget(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend([
                self.index_name.as_str(),
                target.dir_name.as_str(),
                target.file_name.as_str(),
            ]);
        Ok(url)
    }
}

#[async_trait]
impl DocumentSink for ElasticsearchSink {
    async fn put_document(
        &self,
        target: &PublishTarget,
        document: &IndexDocument,
    ) -> Result<(), PublishError> {
        let payload = serde_json::to_string(document)?;

        let response = self
            .client
            .put(self.document_url(target)?)
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(PublishError::BackendResponse {
                backend: BACKEND.to_string(),
                status: status.as_u16(),
                details,
            });
        }

        Ok(())
    }
}
