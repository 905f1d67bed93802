//! Notion blocks
//!
//! Each [`Block`] variant owns the payload for one Notion block type. The
//! `type` field and the payload key are both derived from the variant when
//! serializing, so they cannot disagree.

use super::rich_text::RichText;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A Notion block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(ListItemBlock),
    NumberedListItem(ListItemBlock),
    ToDo(ToDoBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Toggle(ToggleBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Divider,
    Table(TableBlock),
    TableRow(TableRowBlock),
    Image(ImageBlock),
    Bookmark(UrlBlock),
    Embed(UrlBlock),
}

impl Block {
    /// Notion type name, also the payload key
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Toggle(_) => "toggle",
            Block::Code(_) => "code",
            Block::Equation(_) => "equation",
            Block::Divider => "divider",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::Image(_) => "image",
            Block::Bookmark(_) => "bookmark",
            Block::Embed(_) => "embed",
        }
    }

    /// Embedded child blocks
    pub fn children(&self) -> &[Block] {
        match self {
            Block::BulletedListItem(item) | Block::NumberedListItem(item) => &item.children,
            Block::ToDo(todo) => &todo.children,
            Block::Toggle(toggle) => &toggle.children,
            Block::Table(table) => &table.children,
            _ => &[],
        }
    }

    /// Nesting depth of this block
    ///
    /// A block without children has depth 1. A table with rows has depth 2.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Block::depth)
            .max()
            .unwrap_or(0)
    }

    /// Remove and return the children that can be appended in a later call
    ///
    /// Table rows stay attached: Notion only creates a table together with
    /// its rows.
    pub fn take_children(&mut self) -> Vec<Block> {
        match self {
            Block::BulletedListItem(item) | Block::NumberedListItem(item) => {
                std::mem::take(&mut item.children)
            }
            Block::ToDo(todo) => std::mem::take(&mut todo.children),
            Block::Toggle(toggle) => std::mem::take(&mut toggle.children),
            _ => Vec::new(),
        }
    }

    /// Rich text of the block, if it has any
    pub fn rich_text(&self) -> Option<&[RichText]> {
        match self {
            Block::Paragraph(block) => Some(&block.rich_text),
            Block::Heading1(block) | Block::Heading2(block) | Block::Heading3(block) => {
                Some(&block.rich_text)
            }
            Block::BulletedListItem(block) | Block::NumberedListItem(block) => {
                Some(&block.rich_text)
            }
            Block::ToDo(block) => Some(&block.rich_text),
            Block::Quote(block) => Some(&block.rich_text),
            Block::Callout(block) => Some(&block.rich_text),
            Block::Toggle(block) => Some(&block.rich_text),
            Block::Code(block) => Some(&block.rich_text),
            _ => None,
        }
    }
}

/// Payload with no fields, serialized as `{}`
#[derive(Serialize)]
struct EmptyPayload {}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let key = self.type_name();
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("object", "block")?;
        map.serialize_entry("type", key)?;
        match self {
            Block::Paragraph(payload) => map.serialize_entry(key, payload)?,
            Block::Heading1(payload) | Block::Heading2(payload) | Block::Heading3(payload) => {
                map.serialize_entry(key, payload)?
            }
            Block::BulletedListItem(payload) | Block::NumberedListItem(payload) => {
                map.serialize_entry(key, payload)?
            }
            Block::ToDo(payload) => map.serialize_entry(key, payload)?,
            Block::Quote(payload) => map.serialize_entry(key, payload)?,
            Block::Callout(payload) => map.serialize_entry(key, payload)?,
            Block::Toggle(payload) => map.serialize_entry(key, payload)?,
            Block::Code(payload) => map.serialize_entry(key, payload)?,
            Block::Equation(payload) => map.serialize_entry(key, payload)?,
            Block::Divider => map.serialize_entry(key, &EmptyPayload {})?,
            Block::Table(payload) => map.serialize_entry(key, payload)?,
            Block::TableRow(payload) => map.serialize_entry(key, payload)?,
            Block::Image(payload) => map.serialize_entry(key, payload)?,
            Block::Bookmark(payload) | Block::Embed(payload) => map.serialize_entry(key, payload)?,
        }
        map.end()
    }
}

/// Block color; only the default color is produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockColor {
    #[default]
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphBlock {
    pub rich_text: Vec<RichText>,
    pub color: BlockColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingBlock {
    pub rich_text: Vec<RichText>,
    pub color: BlockColor,
    pub is_toggleable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItemBlock {
    pub rich_text: Vec<RichText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToDoBlock {
    pub rich_text: Vec<RichText>,
    pub checked: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteBlock {
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalloutBlock {
    pub rich_text: Vec<RichText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

/// Callout icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleBlock {
    pub rich_text: Vec<RichText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub rich_text: Vec<RichText>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquationBlock {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableBlock {
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
    /// `table_row` blocks
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRowBlock {
    pub cells: Vec<Vec<RichText>>,
}

/// Image payload; only externally hosted files are produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageBlock {
    External { external: ExternalFile },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalFile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlBlock {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bullet(text: &str, children: Vec<Block>) -> Block {
        Block::BulletedListItem(ListItemBlock {
            rich_text: vec![RichText::plain(text)],
            children,
        })
    }

    #[test]
    fn test_heading_serialization() {
        let block = Block::Heading1(HeadingBlock {
            rich_text: vec![RichText::plain("Hello World")],
            color: BlockColor::Default,
            is_toggleable: false,
        });

        let value = serde_json::to_value(&block).unwrap();

        assert_eq!(
            value,
            json!({
                "object": "block",
                "type": "heading_1",
                "heading_1": {
                    "rich_text": [{"type": "text", "text": {"content": "Hello World"}}],
                    "color": "default",
                    "is_toggleable": false
                }
            })
        );
    }

    #[test]
    fn test_divider_serializes_empty_payload() {
        let value = serde_json::to_value(Block::Divider).unwrap();
        assert_eq!(
            value,
            json!({"object": "block", "type": "divider", "divider": {}})
        );
    }

    #[test]
    fn test_empty_children_are_omitted() {
        let value = serde_json::to_value(bullet("leaf", Vec::new())).unwrap();
        assert!(value["bulleted_list_item"].get("children").is_none());
    }

    #[test]
    fn test_image_serialization() {
        let block = Block::Image(ImageBlock::External {
            external: ExternalFile {
                url: "https://x/y.png".to_string(),
            },
        });

        let value = serde_json::to_value(&block).unwrap();

        assert_eq!(
            value["image"],
            json!({"type": "external", "external": {"url": "https://x/y.png"}})
        );
    }

    #[test]
    fn test_callout_icon_serialization() {
        let block = Block::Callout(CalloutBlock {
            rich_text: vec![RichText::plain("x")],
            icon: Some(Icon::Emoji {
                emoji: "💡".to_string(),
            }),
        });

        let value = serde_json::to_value(&block).unwrap();

        assert_eq!(value["callout"]["icon"], json!({"type": "emoji", "emoji": "💡"}));
    }

    #[test]
    fn test_depth() {
        let flat = bullet("a", Vec::new());
        let two = bullet("a", vec![bullet("b", Vec::new())]);
        let three = bullet("a", vec![bullet("b", vec![bullet("c", Vec::new())])]);

        assert_eq!(flat.depth(), 1);
        assert_eq!(two.depth(), 2);
        assert_eq!(three.depth(), 3);
        assert_eq!(Block::Divider.depth(), 1);
    }

    #[test]
    fn test_table_rows_count_as_depth_two_and_stay_attached() {
        let mut table = Block::Table(TableBlock {
            table_width: 1,
            has_column_header: false,
            has_row_header: false,
            children: vec![Block::TableRow(TableRowBlock {
                cells: vec![vec![RichText::plain("c")]],
            })],
        });

        assert_eq!(table.depth(), 2);
        assert!(table.take_children().is_empty());
        assert_eq!(table.children().len(), 1);
    }

    #[test]
    fn test_take_children_strips_list_item() {
        let mut block = bullet("a", vec![bullet("b", Vec::new())]);

        let children = block.take_children();

        assert_eq!(children.len(), 1);
        assert!(block.children().is_empty());
        assert_eq!(block.depth(), 1);
    }
}
