//! Remote block store client
//!
//! The upload protocol and the page pipeline only talk to the store through
//! the [`BlockClient`] trait. [`NotionClient`] is the HTTP implementation.

mod notion;

pub use notion::{NotionClient, NotionClientConfig, DEFAULT_API_BASE_URL, DEFAULT_NOTION_VERSION};

use crate::block_model::Block;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Identity of a block that exists in the store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlockRef {
    /// Store-assigned block id
    pub id: String,

    /// Block type, when the store reports one
    #[serde(rename = "type", default)]
    pub block_type: Option<String>,
}

impl BlockRef {
    /// Create a reference with only an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            block_type: None,
        }
    }
}

/// Errors returned by a block store client
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with an error status
    #[error("Notion API error {status} ({code}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Notion error code, e.g. `object_not_found`
        code: String,
        /// Human readable message
        message: String,
    },

    /// An append returned a different number of blocks than were sent
    #[error("Expected {expected} created blocks, store returned {actual}")]
    ResponseMismatch {
        /// Number of blocks sent
        expected: usize,
        /// Number of blocks returned
        actual: usize,
    },
}

/// Operations the converter needs from a block store
#[async_trait]
pub trait BlockClient: Send + Sync {
    /// List the immediate children of a block
    async fn list_children(&self, block_id: &str) -> Result<Vec<BlockRef>, ClientError>;

    /// Delete a block
    async fn delete_block(&self, block_id: &str) -> Result<(), ClientError>;

    /// Append blocks under a parent
    ///
    /// At most 100 blocks may be sent in one call. The created blocks are
    /// returned in the order they were sent.
    async fn append_children(
        &self,
        parent_id: &str,
        children: &[Block],
    ) -> Result<Vec<BlockRef>, ClientError>;

    /// Retrieve a block or page by id
    async fn retrieve_block(&self, block_id: &str) -> Result<BlockRef, ClientError>;
}
