mod common;

use common::{bullet, first_text, RecordingClient};
use md2notion::block_model::{Block, RichText, TableBlock, TableRowBlock};
use md2notion::client::ClientError;
use md2notion::upload::{upload_blocks, MAX_BLOCKS_PER_REQUEST};

#[tokio::test]
async fn test_empty_sequence_makes_no_calls() {
    let client = RecordingClient::new();

    upload_blocks(&client, "page", Vec::new()).await.unwrap();

    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_flat_blocks_are_batched_by_100() {
    // Arrange
    let client = RecordingClient::new();
    let blocks: Vec<Block> = (0..150)
        .map(|i| bullet(&format!("item {}", i), Vec::new()))
        .collect();

    // Act
    upload_blocks(&client, "page", blocks).await.unwrap();

    // Assert
    let appends = client.appends();
    assert_eq!(appends.len(), 2);
    assert_eq!(appends[0].0, "page");
    assert_eq!(appends[0].1.len(), MAX_BLOCKS_PER_REQUEST);
    assert_eq!(appends[1].0, "page");
    assert_eq!(appends[1].1.len(), 50);
    assert_eq!(first_text(&appends[0].1[0]), "item 0");
    assert_eq!(first_text(&appends[1].1[0]), "item 100");
}

#[tokio::test]
async fn test_depth_two_sends_children_inline() {
    let client = RecordingClient::new();
    let blocks = vec![
        bullet("parent", vec![bullet("child", Vec::new())]),
        bullet("sibling", Vec::new()),
    ];

    upload_blocks(&client, "page", blocks.clone()).await.unwrap();

    let appends = client.appends();
    assert_eq!(appends.len(), 1);
    assert_eq!(appends[0].1, blocks);
}

#[tokio::test]
async fn test_deep_tree_is_stripped_then_reattached_in_order() {
    // Arrange: two depth-3 subtrees
    let client = RecordingClient::new();
    let blocks = vec![
        bullet("a", vec![bullet("a.1", vec![bullet("a.1.1", Vec::new())])]),
        bullet("b", vec![bullet("b.1", vec![bullet("b.1.1", Vec::new())])]),
    ];

    // Act
    upload_blocks(&client, "page", blocks).await.unwrap();

    // Assert
    let appends = client.appends();
    assert_eq!(appends.len(), 3);

    // Top level goes first, without children
    assert_eq!(appends[0].0, "page");
    assert_eq!(
        appends[0].1,
        vec![bullet("a", Vec::new()), bullet("b", Vec::new())]
    );

    // Then each created block receives its original subtree, in order
    assert_eq!(appends[1].0, "block-1");
    assert_eq!(
        appends[1].1,
        vec![bullet("a.1", vec![bullet("a.1.1", Vec::new())])]
    );
    assert_eq!(appends[2].0, "block-2");
    assert_eq!(
        appends[2].1,
        vec![bullet("b.1", vec![bullet("b.1.1", Vec::new())])]
    );
}

#[tokio::test]
async fn test_depth_four_recurses_level_by_level() {
    let client = RecordingClient::new();
    let blocks = vec![bullet(
        "1",
        vec![bullet("2", vec![bullet("3", vec![bullet("4", Vec::new())])])],
    )];

    upload_blocks(&client, "page", blocks).await.unwrap();

    let parents: Vec<String> = client
        .appends()
        .into_iter()
        .map(|(parent, _)| parent)
        .collect();
    assert_eq!(parents, vec!["page", "block-1", "block-2"]);

    let appends = client.appends();
    assert_eq!(appends[1].1, vec![bullet("2", Vec::new())]);
    assert_eq!(appends[2].1, vec![bullet("3", vec![bullet("4", Vec::new())])]);
}

#[tokio::test]
async fn test_deep_tree_batches_finish_children_before_next_batch() {
    let client = RecordingClient::new();
    let mut blocks = vec![bullet(
        "deep",
        vec![bullet("x", vec![bullet("y", Vec::new())])],
    )];
    blocks.extend((1..150).map(|i| bullet(&format!("item {}", i), Vec::new())));

    upload_blocks(&client, "page", blocks).await.unwrap();

    let appends = client.appends();
    assert_eq!(appends.len(), 3);
    assert_eq!((appends[0].0.as_str(), appends[0].1.len()), ("page", 100));
    assert_eq!(appends[1].0, "block-1");
    assert_eq!((appends[2].0.as_str(), appends[2].1.len()), ("page", 50));
}

#[tokio::test]
async fn test_failure_propagates_and_stops_upload() {
    let client = RecordingClient::failing_append(1);
    let blocks: Vec<Block> = (0..150).map(|_| Block::Divider).collect();

    let result = upload_blocks(&client, "page", blocks).await;

    assert!(matches!(result, Err(ClientError::Api { status: 400, .. })));
    assert_eq!(client.appends().len(), 1);
}

#[tokio::test]
async fn test_mismatched_response_is_an_error() {
    let client = RecordingClient::short_appends();
    let blocks = vec![bullet(
        "a",
        vec![bullet("b", vec![bullet("c", Vec::new())])],
    )];

    let result = upload_blocks(&client, "page", blocks).await;

    assert!(matches!(
        result,
        Err(ClientError::ResponseMismatch {
            expected: 1,
            actual: 0
        })
    ));
}

fn largest_nested_array(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .map(|block| {
            block
                .children()
                .len()
                .max(largest_nested_array(block.children()))
        })
        .max()
        .unwrap_or(0)
}

fn table_with_rows(rows: usize) -> Block {
    Block::Table(TableBlock {
        table_width: 1,
        has_column_header: true,
        has_row_header: false,
        children: (0..rows)
            .map(|i| {
                Block::TableRow(TableRowBlock {
                    cells: vec![vec![RichText::plain(format!("row {}", i))]],
                })
            })
            .collect(),
    })
}

#[tokio::test]
async fn test_item_with_many_children_is_split_across_calls() {
    // Arrange: depth 2, but 150 children under one item
    let client = RecordingClient::new();
    let children: Vec<Block> = (0..150)
        .map(|i| bullet(&format!("sub {}", i), Vec::new()))
        .collect();
    let blocks = vec![bullet("parent", children)];

    // Act
    upload_blocks(&client, "page", blocks).await.unwrap();

    // Assert
    let appends = client.appends();
    assert_eq!(appends.len(), 3);
    assert_eq!(appends[0].0, "page");
    assert_eq!(appends[0].1, vec![bullet("parent", Vec::new())]);
    assert_eq!((appends[1].0.as_str(), appends[1].1.len()), ("block-1", 100));
    assert_eq!((appends[2].0.as_str(), appends[2].1.len()), ("block-1", 50));
    assert_eq!(first_text(&appends[2].1[0]), "sub 100");
    assert!(appends
        .iter()
        .all(|(_, blocks)| largest_nested_array(blocks) <= MAX_BLOCKS_PER_REQUEST));
}

#[tokio::test]
async fn test_long_table_rows_are_appended_after_creation() {
    let client = RecordingClient::new();
    let blocks = vec![Block::Divider, table_with_rows(151)];

    upload_blocks(&client, "page", blocks).await.unwrap();

    let appends = client.appends();
    assert_eq!(appends.len(), 2);

    // Table is created with its first 100 rows
    assert_eq!(appends[0].0, "page");
    assert_eq!(appends[0].1[0], Block::Divider);
    assert_eq!(appends[0].1[1].children().len(), MAX_BLOCKS_PER_REQUEST);

    // Remaining rows go to the created table, in order
    assert_eq!(appends[1].0, "block-2");
    assert_eq!(appends[1].1.len(), 51);
    assert_eq!(appends[1].1[0], table_with_rows(101).children()[100]);
    assert!(appends
        .iter()
        .all(|(_, blocks)| largest_nested_array(blocks) <= MAX_BLOCKS_PER_REQUEST));
}

#[tokio::test]
async fn test_table_with_exactly_100_rows_stays_inline() {
    let client = RecordingClient::new();
    let blocks = vec![table_with_rows(100)];

    upload_blocks(&client, "page", blocks.clone()).await.unwrap();

    assert_eq!(client.appends(), vec![("page".to_string(), blocks)]);
}
