//! Inline content of text-bearing elements
//!
//! Inline content is either a plain string or an ordered sequence of leaf
//! nodes (styled text, links, equations).

/// Style flags that can be applied to an inline leaf
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyles {
    /// Bold formatting
    pub bold: bool,

    /// Italic formatting
    pub italic: bool,

    /// Strikethrough formatting
    pub strikethrough: bool,

    /// Underline formatting
    pub underline: bool,

    /// Inline code formatting
    pub code: bool,
}

impl TextStyles {
    /// Styles with only `bold` set
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    /// Styles with only `italic` set
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    /// Styles with only `strikethrough` set
    pub fn strikethrough() -> Self {
        Self {
            strikethrough: true,
            ..Self::default()
        }
    }

    /// Styles with only `code` set
    pub fn code() -> Self {
        Self {
            code: true,
            ..Self::default()
        }
    }

    /// Check if any style flag is set
    pub fn is_styled(&self) -> bool {
        self.bold || self.italic || self.strikethrough || self.underline || self.code
    }
}

/// A span of text with consistent styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Styles applied to the whole span
    pub styles: TextStyles,
}

impl TextRun {
    /// Create an unstyled text run
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: TextStyles::default(),
        }
    }

    /// Create a text run with the given styles
    pub fn styled(text: impl Into<String>, styles: TextStyles) -> Self {
        Self {
            text: text.into(),
            styles,
        }
    }
}

/// A hyperlink
///
/// Used both as an inline leaf and as a standalone element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    /// Link target
    pub url: String,

    /// Visible link text
    pub text: String,

    /// Optional title
    pub caption: Option<String>,
}

impl LinkElement {
    /// Create a link without a title
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            caption: None,
        }
    }
}

/// A math expression
///
/// Used both as an inline leaf and as a standalone element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationElement {
    /// The expression source (TeX)
    pub expression: String,

    /// Styles applied to the rendered expression
    pub styles: TextStyles,
}

impl EquationElement {
    /// Create an unstyled equation
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            styles: TextStyles::default(),
        }
    }
}

/// One leaf of a rich text sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    Text(TextRun),
    Link(LinkElement),
    Equation(EquationElement),
}

/// Content of a text-bearing element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextContent {
    /// A single unstyled string
    Plain(String),

    /// An ordered sequence of leaves
    Rich(Vec<InlineNode>),
}

impl TextContent {
    /// Concatenated text of every leaf, ignoring styles
    pub fn plain_text(&self) -> String {
        match self {
            TextContent::Plain(text) => text.clone(),
            TextContent::Rich(nodes) => nodes
                .iter()
                .map(|node| match node {
                    InlineNode::Text(run) => run.text.as_str(),
                    InlineNode::Link(link) => link.text.as_str(),
                    InlineNode::Equation(eq) => eq.expression.as_str(),
                })
                .collect(),
        }
    }

    /// Check if the content holds no text at all
    pub fn is_empty(&self) -> bool {
        match self {
            TextContent::Plain(text) => text.is_empty(),
            TextContent::Rich(nodes) => nodes.is_empty(),
        }
    }
}

impl Default for TextContent {
    fn default() -> Self {
        TextContent::Rich(Vec::new())
    }
}

impl From<&str> for TextContent {
    fn from(text: &str) -> Self {
        TextContent::Plain(text.to_string())
    }
}

impl From<String> for TextContent {
    fn from(text: String) -> Self {
        TextContent::Plain(text)
    }
}
