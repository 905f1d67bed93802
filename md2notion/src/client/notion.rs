//! Notion REST API client

use super::{BlockClient, BlockRef, ClientError};
use crate::block_model::Block;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public Notion API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.notion.com";

/// API version sent in the `Notion-Version` header
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

const PAGE_SIZE: usize = 100;

/// Connection settings for [`NotionClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotionClientConfig {
    /// Integration token
    pub api_key: String,
    /// Base URL without a trailing `/v1`
    pub base_url: String,
    /// Value of the `Notion-Version` header
    pub notion_version: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl NotionClientConfig {
    /// Settings for the public API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// [`BlockClient`] backed by the Notion REST API
pub struct NotionClient {
    client: Client,
    config: NotionClientConfig,
}

impl NotionClient {
    /// Create a client
    ///
    /// # Parameters
    /// * `config` - API key, endpoint and timeout
    ///
    /// # Returns
    /// * `Ok(NotionClient)` - Ready to send requests
    /// * `Err(ClientError)` - The HTTP client could not be built
    pub fn new(config: NotionClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.config.api_key)
            .header("Notion-Version", &self.config.notion_version)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(error) => (error.code, error.message),
            Err(_) => ("unknown".to_string(), body),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

#[async_trait]
impl BlockClient for NotionClient {
    async fn list_children(&self, block_id: &str) -> Result<Vec<BlockRef>, ClientError> {
        let mut children = Vec::new();
        let mut cursor: Option<String> = None;

        let path = format!("blocks/{}/children", block_id);

        loop {
            let mut request = self
                .client
                .get(self.url(&path))
                .query(&[("page_size", PAGE_SIZE.to_string())]);
            if let Some(cursor) = &cursor {
                request = request.query(&[("start_cursor", cursor)]);
            }

            let response = self.send(request).await?;
            let page: ListResponse = response.json().await?;
            children.extend(page.results);

            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        log::debug!("Block {} has {} children", block_id, children.len());
        Ok(children)
    }

    async fn delete_block(&self, block_id: &str) -> Result<(), ClientError> {
        let path = format!("blocks/{}", block_id);
        self.send(self.client.delete(self.url(&path))).await?;
        Ok(())
    }

    async fn append_children(
        &self,
        parent_id: &str,
        children: &[Block],
    ) -> Result<Vec<BlockRef>, ClientError> {
        let path = format!("blocks/{}/children", parent_id);
        let request = self
            .client
            .patch(self.url(&path))
            .json(&AppendRequest { children });

        let response = self.send(request).await?;
        let created: ListResponse = response.json().await?;
        Ok(created.results)
    }

    async fn retrieve_block(&self, block_id: &str) -> Result<BlockRef, ClientError> {
        let path = format!("blocks/{}", block_id);
        let response = self.send(self.client.get(self.url(&path))).await?;
        Ok(response.json().await?)
    }
}

#[derive(Serialize)]
struct AppendRequest<'a> {
    children: &'a [Block],
}

/// Paginated list of blocks
#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Vec<BlockRef>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// Notion error object
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}
