//! Callout elements and special callout markers
//!
//! A blockquote whose text starts with a marker such as `[!NOTE]` is a
//! callout. The marker selects a fixed icon.

use regex::Regex;
use std::sync::LazyLock;

static CALLOUT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\s*\[!(NOTE|TIP|IMPORTANT|WARNING|CAUTION)\](.*)")
        .expect("callout marker regex")
});

/// Special callout type, selected by the marker keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalloutType {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl CalloutType {
    /// Parse a marker keyword (case-insensitive)
    ///
    /// # Parameters
    /// * `keyword` - The word between `[!` and `]`
    ///
    /// # Returns
    /// * `Some(CalloutType)` - The keyword names a known callout type
    /// * `None` - Unknown keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "NOTE" => Some(CalloutType::Note),
            "TIP" => Some(CalloutType::Tip),
            "IMPORTANT" => Some(CalloutType::Important),
            "WARNING" => Some(CalloutType::Warning),
            "CAUTION" => Some(CalloutType::Caution),
            _ => None,
        }
    }

    /// Icon glyph shown for this callout type
    pub fn icon(self) -> &'static str {
        match self {
            CalloutType::Note => "ℹ️",
            CalloutType::Tip => "💡",
            CalloutType::Important | CalloutType::Warning | CalloutType::Caution => "⚠️",
        }
    }
}

/// A highlighted block of text with an optional icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutElement {
    /// Callout body, with any special marker removed
    pub text: String,

    /// Icon supplied at construction
    pub icon: Option<String>,

    /// Special type detected from a leading marker
    pub callout_type: Option<CalloutType>,
}

impl CalloutElement {
    /// Create a callout, detecting a leading special marker
    ///
    /// When `text` starts with a marker the body becomes the text following
    /// the marker, trimmed.
    ///
    /// # Parameters
    /// * `text` - Raw callout text, possibly starting with `[!TYPE]`
    /// * `icon` - Explicit icon, used only when no marker is present
    pub fn new(text: &str, icon: Option<String>) -> Self {
        match detect_marker(text) {
            Some((callout_type, body)) => Self {
                text: body,
                icon,
                callout_type: Some(callout_type),
            },
            None => Self {
                text: text.to_string(),
                icon,
                callout_type: None,
            },
        }
    }

    /// Resolved icon glyph
    ///
    /// The special type's icon wins over an explicitly supplied icon.
    pub fn resolved_icon(&self) -> Option<&str> {
        match self.callout_type {
            Some(callout_type) => Some(callout_type.icon()),
            None => self.icon.as_deref(),
        }
    }

    /// Check whether `text` starts with a special callout marker
    pub fn is_special_callout_text(text: &str) -> bool {
        CALLOUT_MARKER.is_match(text.trim())
    }
}

fn detect_marker(text: &str) -> Option<(CalloutType, String)> {
    let captures = CALLOUT_MARKER.captures(text.trim())?;
    let callout_type = CalloutType::from_keyword(captures.get(1)?.as_str())?;
    let body = captures.get(2).map_or("", |m| m.as_str()).trim();
    Some((callout_type, body.to_string()))
}
