//! Document elements
//!
//! The closed set of node kinds a parsed markdown document is made of.

use super::callout::CalloutElement;
use super::code_language::CodeLanguage;
use super::rich_text::{EquationElement, LinkElement, TextContent};
use std::fmt;

/// A node of the element tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Document root; has no block form of its own
    Page(PageElement),

    /// A heading or a paragraph
    Text(TextElement),

    /// A bulleted or numbered list item
    ListItem(ListItemElement),

    /// A checklist item
    Todo(TodoElement),

    /// A block quote
    Quote {
        /// Quoted text
        text: String,
    },

    /// A highlighted block with an icon
    Callout(CalloutElement),

    /// A collapsible block
    Toggle(ToggleElement),

    /// A table of plain-text cells
    Table(TableElement),

    /// A code block
    Code(CodeElement),

    /// An externally hosted image
    Image(ImageElement),

    /// A standalone link
    Link(LinkElement),

    /// A display equation
    Equation(EquationElement),

    /// A thematic break
    Divider,

    /// A bookmark card for a URL
    Bookmark {
        /// Bookmarked URL
        url: String,
    },

    /// An embedded URL
    Embed {
        /// Embedded URL
        url: String,
    },

    /// Raw HTML
    Html {
        /// HTML source
        html: String,
    },
}

/// Discriminant of an [`Element`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Page,
    Text,
    ListItem,
    Todo,
    Quote,
    Callout,
    Toggle,
    Table,
    Code,
    Image,
    Link,
    Equation,
    Divider,
    Bookmark,
    Embed,
    Html,
}

impl Element {
    /// Kind tag of this element
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Page(_) => ElementKind::Page,
            Element::Text(_) => ElementKind::Text,
            Element::ListItem(_) => ElementKind::ListItem,
            Element::Todo(_) => ElementKind::Todo,
            Element::Quote { .. } => ElementKind::Quote,
            Element::Callout(_) => ElementKind::Callout,
            Element::Toggle(_) => ElementKind::Toggle,
            Element::Table(_) => ElementKind::Table,
            Element::Code(_) => ElementKind::Code,
            Element::Image(_) => ElementKind::Image,
            Element::Link(_) => ElementKind::Link,
            Element::Equation(_) => ElementKind::Equation,
            Element::Divider => ElementKind::Divider,
            Element::Bookmark { .. } => ElementKind::Bookmark,
            Element::Embed { .. } => ElementKind::Embed,
            Element::Html { .. } => ElementKind::Html,
        }
    }

    /// Nested elements owned by this element
    pub fn children(&self) -> &[Element] {
        match self {
            Element::Page(page) => &page.children,
            Element::ListItem(item) => &item.children,
            Element::Todo(todo) => &todo.children,
            Element::Toggle(toggle) => &toggle.children,
            _ => &[],
        }
    }

    /// Shorthand for a paragraph of plain text
    pub fn paragraph(text: impl Into<String>) -> Self {
        Element::Text(TextElement {
            content: TextContent::Plain(text.into()),
            level: TextLevel::Paragraph,
        })
    }
}

impl ElementKind {
    /// Lower-case name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Page => "page",
            ElementKind::Text => "text",
            ElementKind::ListItem => "list_item",
            ElementKind::Todo => "todo",
            ElementKind::Quote => "quote",
            ElementKind::Callout => "callout",
            ElementKind::Toggle => "toggle",
            ElementKind::Table => "table",
            ElementKind::Code => "code",
            ElementKind::Image => "image",
            ElementKind::Link => "link",
            ElementKind::Equation => "equation",
            ElementKind::Divider => "divider",
            ElementKind::Bookmark => "bookmark",
            ElementKind::Embed => "embed",
            ElementKind::Html => "html",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageElement {
    /// Page title
    pub title: String,

    /// Top-level elements
    pub children: Vec<Element>,
}

/// Level of a text element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextLevel {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
}

impl TextLevel {
    /// Map a markdown heading depth to a level
    ///
    /// Depths past 3 have no heading form and become paragraphs.
    pub fn from_heading_depth(depth: usize) -> Self {
        match depth {
            1 => TextLevel::Heading1,
            2 => TextLevel::Heading2,
            3 => TextLevel::Heading3,
            _ => TextLevel::Paragraph,
        }
    }
}

/// A heading or paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextElement {
    /// Text content
    pub content: TextContent,

    /// Heading level or paragraph
    pub level: TextLevel,
}

/// Marker style of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

/// A list item with optional nested content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemElement {
    /// Item text
    pub text: TextContent,

    /// Bulleted or numbered
    pub kind: ListKind,

    /// Nested elements (sub-lists, paragraphs, code, ...)
    pub children: Vec<Element>,
}

/// A checklist item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoElement {
    /// Item text
    pub text: TextContent,

    /// Whether the box is ticked
    pub checked: bool,

    /// Nested elements
    pub children: Vec<Element>,
}

/// A collapsible block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleElement {
    /// Always-visible title
    pub title: TextContent,

    /// Collapsed content
    pub children: Vec<Element>,
}

/// A table of plain-text cells
///
/// The first row is the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableElement {
    /// Rows of cells
    pub rows: Vec<Vec<String>>,
}

impl TableElement {
    /// Number of columns, taken from the first row
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// A code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeElement {
    /// Source code
    pub code: String,

    /// Language tag
    pub language: CodeLanguage,
}

/// An externally hosted image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageElement {
    /// Image URL
    pub url: String,

    /// Alternative text
    pub caption: Option<String>,
}
