//! Element to Notion block conversion
//!
//! Every element kind maps to exactly one block builder. Elements with nested
//! content (list items, to-dos, toggles) convert their children through the
//! same dispatch.

mod image;
mod rich_text;

pub use rich_text::{split_text, MAX_TEXT_LENGTH};

use crate::block_model::{
    Block, BlockColor, CalloutBlock, CodeBlock, EquationBlock, HeadingBlock, Icon, ListItemBlock,
    ParagraphBlock, QuoteBlock, TableBlock, TableRowBlock, ToDoBlock, ToggleBlock, UrlBlock,
};
use crate::element_model::{
    CalloutElement, CodeLanguage, Element, InlineNode, ListItemElement, ListKind, TableElement,
    TextElement, TextLevel, TodoElement, ToggleElement,
};
use rich_text::{inline_rich_text, plain_rich_text};

/// Convert a sequence of elements into Notion blocks
///
/// # Parameters
/// * `elements` - Elements in document order
///
/// # Returns
/// * `Vec<Block>` - One block per element that has a block form, in order
pub fn convert(elements: &[Element]) -> Vec<Block> {
    elements.iter().filter_map(convert_element).collect()
}

/// Convert a single element
///
/// # Returns
/// * `Some(Block)` - The block for this element
/// * `None` - The element has no block form (the page root)
pub fn convert_element(element: &Element) -> Option<Block> {
    log::trace!("Converting {} element", element.kind());
    let block = match element {
        Element::Page(_) => {
            log::debug!("Skipping {} element, it has no block form", element.kind());
            return None;
        }
        Element::Text(text) => convert_text(text),
        Element::ListItem(item) => convert_list_item(item),
        Element::Todo(todo) => convert_todo(todo),
        Element::Quote { text } => Block::Quote(QuoteBlock {
            rich_text: plain_rich_text(text),
        }),
        Element::Callout(callout) => convert_callout(callout),
        Element::Toggle(toggle) => convert_toggle(toggle),
        Element::Table(table) => convert_table(table),
        Element::Code(code) => Block::Code(CodeBlock {
            rich_text: plain_rich_text(&code.code),
            language: code.language.notion_name().to_string(),
        }),
        Element::Image(image) => image::convert_image(image),
        Element::Link(link) => Block::Paragraph(ParagraphBlock {
            rich_text: inline_rich_text(&[InlineNode::Link(link.clone())]),
            color: BlockColor::Default,
        }),
        Element::Equation(eq) => Block::Equation(EquationBlock {
            expression: eq.expression.clone(),
        }),
        Element::Divider => Block::Divider,
        Element::Bookmark { url } => Block::Bookmark(UrlBlock { url: url.clone() }),
        Element::Embed { url } => Block::Embed(UrlBlock { url: url.clone() }),
        Element::Html { html } => Block::Code(CodeBlock {
            rich_text: plain_rich_text(html),
            language: CodeLanguage::Html.notion_name().to_string(),
        }),
    };
    Some(block)
}

fn convert_text(text: &TextElement) -> Block {
    let rich_text = rich_text::rich_text(&text.content);
    let heading = |rich_text| HeadingBlock {
        rich_text,
        color: BlockColor::Default,
        is_toggleable: false,
    };

    match text.level {
        TextLevel::Heading1 => Block::Heading1(heading(rich_text)),
        TextLevel::Heading2 => Block::Heading2(heading(rich_text)),
        TextLevel::Heading3 => Block::Heading3(heading(rich_text)),
        TextLevel::Paragraph => Block::Paragraph(ParagraphBlock {
            rich_text,
            color: BlockColor::Default,
        }),
    }
}

fn convert_list_item(item: &ListItemElement) -> Block {
    let block = ListItemBlock {
        rich_text: rich_text::rich_text(&item.text),
        children: convert(&item.children),
    };

    match item.kind {
        ListKind::Bulleted => Block::BulletedListItem(block),
        ListKind::Numbered => Block::NumberedListItem(block),
    }
}

fn convert_todo(todo: &TodoElement) -> Block {
    Block::ToDo(ToDoBlock {
        rich_text: rich_text::rich_text(&todo.text),
        checked: todo.checked,
        children: convert(&todo.children),
    })
}

fn convert_callout(callout: &CalloutElement) -> Block {
    Block::Callout(CalloutBlock {
        rich_text: plain_rich_text(&callout.text),
        icon: callout.resolved_icon().map(|emoji| Icon::Emoji {
            emoji: emoji.to_string(),
        }),
    })
}

fn convert_toggle(toggle: &ToggleElement) -> Block {
    Block::Toggle(ToggleBlock {
        rich_text: rich_text::rich_text(&toggle.title),
        children: convert(&toggle.children),
    })
}

fn convert_table(table: &TableElement) -> Block {
    let rows = table
        .rows
        .iter()
        .map(|row| {
            Block::TableRow(TableRowBlock {
                cells: row.iter().map(|cell| plain_rich_text(cell)).collect(),
            })
        })
        .collect();

    Block::Table(TableBlock {
        table_width: table.width(),
        has_column_header: false,
        has_row_header: false,
        children: rows,
    })
}
