//! Store-agnostic element model
//!
//! This module defines the intermediate representation produced by the
//! markdown parser and consumed by the block converter. Elements are plain
//! values: a parent owns its children and nothing points back up the tree.

// Submodules
mod callout;
mod code_language;
mod element;
mod rich_text;

// Re-export public types
pub use callout::{CalloutElement, CalloutType};
pub use code_language::CodeLanguage;
pub use element::{
    CodeElement, Element, ElementKind, ImageElement, ListItemElement, ListKind, PageElement,
    TableElement, TextElement, TextLevel, TodoElement, ToggleElement,
};
pub use rich_text::{EquationElement, InlineNode, LinkElement, TextContent, TextRun, TextStyles};
