//! Rich text objects

use serde::Serialize;

/// One rich text object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichText {
    Text {
        text: TextObject,
        #[serde(skip_serializing_if = "Option::is_none")]
        annotations: Option<Annotations>,
    },
    Equation {
        equation: EquationObject,
        #[serde(skip_serializing_if = "Option::is_none")]
        annotations: Option<Annotations>,
    },
}

impl RichText {
    /// Unstyled text with no link field
    pub fn plain(content: impl Into<String>) -> Self {
        RichText::Text {
            text: TextObject {
                content: content.into(),
                link: None,
            },
            annotations: None,
        }
    }

    /// Text content, or the expression of an equation
    pub fn content(&self) -> &str {
        match self {
            RichText::Text { text, .. } => &text.content,
            RichText::Equation { equation, .. } => &equation.expression,
        }
    }
}

/// Content of a text rich text object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextObject {
    pub content: String,

    /// Absent for plain text; `null` for link text whose URL was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

/// Link target of a text object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Link {
    Url { url: String },
    /// Serializes as `null`
    Unlinked,
}

/// Content of an equation rich text object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquationObject {
    pub expression: String,
}

/// Style flags of a rich text object
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}
