//! Notion block model
//!
//! Typed representation of the blocks sent to the Notion API. Serializing a
//! [`Block`] yields the exact JSON object the `append block children`
//! endpoint accepts.

// Submodules
mod block;
mod rich_text;

// Re-export public types
pub use block::{
    Block, BlockColor, CalloutBlock, CodeBlock, EquationBlock, ExternalFile, HeadingBlock, Icon,
    ImageBlock, ListItemBlock, ParagraphBlock, QuoteBlock, TableBlock, TableRowBlock, ToDoBlock,
    ToggleBlock, UrlBlock,
};
pub use rich_text::{Annotations, EquationObject, Link, RichText, TextObject};
