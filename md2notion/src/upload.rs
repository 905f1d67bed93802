//! Block upload protocol
//!
//! Notion accepts at most 100 blocks per append call, at most 100 children
//! in any nested `children` array and at most two levels of nesting in one
//! call. Shallow block trees with small child lists are appended in batches
//! with their children inline. Anything else is appended one level at a
//! time: each batch is sent with children stripped, then every created block
//! receives its original children through a recursive upload. Tables keep
//! their first 100 rows inline and receive the rest afterwards.

use crate::block_model::Block;
use crate::client::{BlockClient, ClientError};
use futures::future::BoxFuture;
use futures::FutureExt;

/// Maximum number of blocks in one append call
pub const MAX_BLOCKS_PER_REQUEST: usize = 100;

/// Deepest nesting that can be sent in a single append call
pub const MAX_INLINE_DEPTH: usize = 2;

/// Maximum nesting depth of a block sequence
///
/// # Returns
/// * `0` for an empty sequence, otherwise the depth of the deepest block
pub fn nesting_depth(blocks: &[Block]) -> usize {
    blocks.iter().map(Block::depth).max().unwrap_or(0)
}

/// Upload blocks under a parent block
///
/// Batches and their child uploads are processed strictly in order. An
/// empty sequence makes no calls. The first failing call aborts the upload
/// and its error is returned unchanged; blocks created before it remain.
///
/// # Parameters
/// * `client` - Block store client
/// * `parent_id` - Block or page that receives the blocks
/// * `blocks` - Blocks in document order, possibly with embedded children
pub fn upload_blocks<'a>(
    client: &'a dyn BlockClient,
    parent_id: &'a str,
    blocks: Vec<Block>,
) -> BoxFuture<'a, Result<(), ClientError>> {
    async move {
        if blocks.is_empty() {
            return Ok(());
        }

        let depth = nesting_depth(&blocks);
        if depth <= MAX_INLINE_DEPTH && !has_oversized_children(&blocks) {
            upload_inline(client, parent_id, &blocks).await
        } else {
            log::debug!(
                "Uploading {} blocks of depth {} under {} level by level",
                blocks.len(),
                depth,
                parent_id
            );
            upload_level_by_level(client, parent_id, blocks).await
        }
    }
    .boxed()
}

/// Whether any block carries more children than one append call accepts
pub fn has_oversized_children(blocks: &[Block]) -> bool {
    blocks
        .iter()
        .any(|block| block.children().len() > MAX_BLOCKS_PER_REQUEST)
}

/// Remove the children that must be appended after the block exists
///
/// Tables keep up to [`MAX_BLOCKS_PER_REQUEST`] rows; Notion only creates a
/// table together with its rows.
fn take_deferred_children(block: &mut Block) -> Vec<Block> {
    match block {
        Block::Table(table) if table.children.len() > MAX_BLOCKS_PER_REQUEST => {
            table.children.split_off(MAX_BLOCKS_PER_REQUEST)
        }
        _ => block.take_children(),
    }
}

async fn upload_inline(
    client: &dyn BlockClient,
    parent_id: &str,
    blocks: &[Block],
) -> Result<(), ClientError> {
    for batch in blocks.chunks(MAX_BLOCKS_PER_REQUEST) {
        log::debug!("Appending {} blocks to {}", batch.len(), parent_id);
        client.append_children(parent_id, batch).await?;
    }
    Ok(())
}

async fn upload_level_by_level(
    client: &dyn BlockClient,
    parent_id: &str,
    mut blocks: Vec<Block>,
) -> Result<(), ClientError> {
    while !blocks.is_empty() {
        let rest = blocks.split_off(blocks.len().min(MAX_BLOCKS_PER_REQUEST));
        let mut batch = std::mem::replace(&mut blocks, rest);

        let children: Vec<Vec<Block>> = batch.iter_mut().map(take_deferred_children).collect();

        log::debug!("Appending {} stripped blocks to {}", batch.len(), parent_id);
        let created = client.append_children(parent_id, &batch).await?;
        if created.len() != batch.len() {
            return Err(ClientError::ResponseMismatch {
                expected: batch.len(),
                actual: created.len(),
            });
        }

        for (created_block, block_children) in created.iter().zip(children) {
            if !block_children.is_empty() {
                upload_blocks(client, &created_block.id, block_children).await?;
            }
        }
    }
    Ok(())
}
