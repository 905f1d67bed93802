//! Markdown to Notion page pipeline
//!
//! Stages, in order:
//! 1. Check that the destination page is accessible
//! 2. Parse markdown into elements
//! 3. Convert elements into Notion blocks
//! 4. In replace mode, delete the page's existing children
//! 5. Upload the blocks

use crate::block_model::Block;
use crate::client::{BlockClient, ClientError};
use crate::converter;
use crate::parser::MarkdownParser;
use crate::upload::upload_blocks;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How new content is combined with the page's existing content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Delete every existing child block first
    #[default]
    Replace,
    /// Keep existing blocks and add after them
    Append,
}

/// Parse markdown and convert it to Notion blocks
///
/// # Parameters
/// * `markdown` - Raw markdown content
///
/// # Returns
/// * `Vec<Block>` - Blocks ready to upload
pub fn markdown_to_blocks(markdown: &str) -> Vec<Block> {
    let elements = MarkdownParser::new().parse(markdown);
    log::debug!("Parsed {} top-level elements", elements.len());
    converter::convert(&elements)
}

/// Write markdown content to a Notion page
///
/// The page is checked before any other work; an inaccessible page fails
/// with [`PipelineError::PageAccess`] and nothing is modified.
///
/// # Parameters
/// * `client` - Block store client
/// * `markdown` - Raw markdown content
/// * `page_id` - Destination page
/// * `mode` - Replace or append to the existing content
///
/// # Returns
/// * `Ok(())` - Every block was uploaded
/// * `Err(PipelineError)` - Access check or a later remote call failed
pub async fn markdown_to_notion(
    client: &dyn BlockClient,
    markdown: &str,
    page_id: &str,
    mode: UpdateMode,
) -> Result<(), PipelineError> {
    check_page_access(client, page_id).await?;

    let blocks = markdown_to_blocks(markdown);
    log::info!("Converted markdown into {} blocks", blocks.len());

    if mode == UpdateMode::Replace {
        let removed = clear_page(client, page_id).await?;
        log::info!("Removed {} existing blocks from {}", removed, page_id);
    }

    upload_blocks(client, page_id, blocks).await?;
    Ok(())
}

/// Fail unless the page can be retrieved
pub async fn check_page_access(client: &dyn BlockClient, page_id: &str) -> Result<(), PipelineError> {
    client
        .retrieve_block(page_id)
        .await
        .map(|_| ())
        .map_err(|source| PipelineError::PageAccess {
            page_id: page_id.to_string(),
            source,
        })
}

/// Delete every immediate child of a page, one call per child
///
/// # Returns
/// * `Ok(usize)` - Number of deleted blocks
pub async fn clear_page(client: &dyn BlockClient, page_id: &str) -> Result<usize, ClientError> {
    let children = client.list_children(page_id).await?;
    for child in &children {
        client.delete_block(&child.id).await?;
    }
    Ok(children.len())
}

/// Pipeline errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(
        "Cannot access Notion page {page_id}. Make sure the page exists and your integration has access."
    )]
    PageAccess {
        page_id: String,
        #[source]
        source: ClientError,
    },

    #[error("Notion request failed: {0}")]
    Client(#[from] ClientError),
}
