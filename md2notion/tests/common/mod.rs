//! In-memory block store used by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use md2notion::block_model::{Block, ListItemBlock, RichText};
use md2notion::client::{BlockClient, BlockRef, ClientError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One recorded client call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Retrieve(String),
    List(String),
    Delete(String),
    Append { parent: String, blocks: Vec<Block> },
}

/// Fake client that records every call and hands out sequential ids
#[derive(Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    next_id: AtomicUsize,
    /// Children returned by `list_children`
    pub existing_children: Vec<String>,
    /// Make `retrieve_block` fail
    pub inaccessible: bool,
    /// Make the n-th append call (1-based) fail
    pub fail_append: Option<usize>,
    /// Return one block fewer than sent from appends
    pub short_append: bool,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(ids: &[&str]) -> Self {
        Self {
            existing_children: ids.iter().map(|id| id.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn failing_append(nth: usize) -> Self {
        Self {
            fail_append: Some(nth),
            ..Self::default()
        }
    }

    pub fn short_appends() -> Self {
        Self {
            short_append: true,
            ..Self::default()
        }
    }

    pub fn inaccessible() -> Self {
        Self {
            inaccessible: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn appends(&self) -> Vec<(String, Vec<Block>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Append { parent, blocks } => Some((parent, blocks)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn append_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, Call::Append { .. }))
            .count()
    }

    fn api_error(message: &str) -> ClientError {
        ClientError::Api {
            status: 400,
            code: "validation_error".to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl BlockClient for RecordingClient {
    async fn list_children(&self, block_id: &str) -> Result<Vec<BlockRef>, ClientError> {
        self.record(Call::List(block_id.to_string()));
        Ok(self
            .existing_children
            .iter()
            .map(|id| BlockRef::new(id.clone()))
            .collect())
    }

    async fn delete_block(&self, block_id: &str) -> Result<(), ClientError> {
        self.record(Call::Delete(block_id.to_string()));
        Ok(())
    }

    async fn append_children(
        &self,
        parent_id: &str,
        children: &[Block],
    ) -> Result<Vec<BlockRef>, ClientError> {
        self.record(Call::Append {
            parent: parent_id.to_string(),
            blocks: children.to_vec(),
        });

        if self.fail_append == Some(self.append_count()) {
            return Err(Self::api_error("append rejected"));
        }

        let count = if self.short_append {
            children.len().saturating_sub(1)
        } else {
            children.len()
        };

        Ok((0..count)
            .map(|_| {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                BlockRef::new(format!("block-{}", id))
            })
            .collect())
    }

    async fn retrieve_block(&self, block_id: &str) -> Result<BlockRef, ClientError> {
        self.record(Call::Retrieve(block_id.to_string()));
        if self.inaccessible {
            return Err(ClientError::Api {
                status: 404,
                code: "object_not_found".to_string(),
                message: "Could not find page".to_string(),
            });
        }
        Ok(BlockRef::new(block_id))
    }
}

/// A bulleted list item with the given children
pub fn bullet(text: &str, children: Vec<Block>) -> Block {
    Block::BulletedListItem(ListItemBlock {
        rich_text: vec![RichText::plain(text)],
        children,
    })
}

/// Text of a block's first rich text object
pub fn first_text(block: &Block) -> &str {
    block
        .rich_text()
        .and_then(|rich| rich.first())
        .map(RichText::content)
        .unwrap_or_default()
}
