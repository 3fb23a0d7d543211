use crate::config::backend::BackendConfig;
use crate::domain::model::CreatedDocument;
use crate::domain::ports::{DocumentStore, Query};
use crate::utils::error::{Result, SeedError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use std::time::Duration;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";
/// Asks the server to generate the document id.
const UNIQUE_ID: &str = "unique()";

/// REST client for the hosted document database.
#[derive(Debug, Clone)]
pub struct AppwriteClient {
    config: BackendConfig,
    client: Client,
}

impl AppwriteClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn with_timeout(config: BackendConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { config, client })
    }

    fn documents_url(&self, collection_id: &str) -> String {
        format!(
            "{}/{}/documents",
            self.config.collections_url(),
            collection_id
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(PROJECT_HEADER, &self.config.project_id);
        match &self.config.api_key {
            Some(key) => request.header(KEY_HEADER, key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = self.authorize(request).send().await?;
        tracing::debug!("Backend response status: {}", response.status());
        parse_response(response).await
    }
}

/// Maps non-2xx responses to `SeedError::Backend`, preferring the server's message.
async fn parse_response(response: Response) -> Result<Value> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body
            }
        });

    Err(SeedError::Backend {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl DocumentStore for AppwriteClient {
    async fn create_document(&self, collection_id: &str, data: Value) -> Result<CreatedDocument> {
        let url = self.documents_url(collection_id);
        tracing::debug!("POST {}", url);

        let body = json!({ "documentId": UNIQUE_ID, "data": data });
        let value = self.send(self.client.post(&url).json(&body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_document(&self, collection_id: &str, document_id: &str) -> Result<Value> {
        let url = format!("{}/{}", self.documents_url(collection_id), document_id);
        tracing::debug!("GET {}", url);

        self.send(self.client.get(&url)).await
    }

    async fn list_documents(&self, collection_id: &str, queries: &[Query]) -> Result<Vec<Value>> {
        let url = self.documents_url(collection_id);
        tracing::debug!("GET {} ({} queries)", url, queries.len());

        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|q| ("queries[]", q.to_query_string()))
            .collect();
        let value = self.send(self.client.get(&url).query(&params)).await?;

        match value.get("documents") {
            Some(Value::Array(documents)) => Ok(documents.clone()),
            _ => Err(SeedError::Backend {
                status: 200,
                message: "list response has no documents array".to_string(),
            }),
        }
    }
}
