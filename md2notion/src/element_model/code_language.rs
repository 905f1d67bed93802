//! Code block languages

/// Languages a code element can be tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeLanguage {
    JavaScript,
    TypeScript,
    Python,
    Java,
    CSharp,
    Cpp,
    Go,
    Ruby,
    Swift,
    Kotlin,
    Rust,
    Shell,
    Scala,
    Sql,
    Html,
    Css,
    Json,
    Yaml,
    Markdown,
    Mermaid,
    PlainText,
}

impl CodeLanguage {
    /// Every supported language
    pub const ALL: [CodeLanguage; 21] = [
        CodeLanguage::JavaScript,
        CodeLanguage::TypeScript,
        CodeLanguage::Python,
        CodeLanguage::Java,
        CodeLanguage::CSharp,
        CodeLanguage::Cpp,
        CodeLanguage::Go,
        CodeLanguage::Ruby,
        CodeLanguage::Swift,
        CodeLanguage::Kotlin,
        CodeLanguage::Rust,
        CodeLanguage::Shell,
        CodeLanguage::Scala,
        CodeLanguage::Sql,
        CodeLanguage::Html,
        CodeLanguage::Css,
        CodeLanguage::Json,
        CodeLanguage::Yaml,
        CodeLanguage::Markdown,
        CodeLanguage::Mermaid,
        CodeLanguage::PlainText,
    ];

    /// The fence tag that selects this language
    pub fn tag(self) -> &'static str {
        match self {
            CodeLanguage::JavaScript => "javascript",
            CodeLanguage::TypeScript => "typescript",
            CodeLanguage::Python => "python",
            CodeLanguage::Java => "java",
            CodeLanguage::CSharp => "csharp",
            CodeLanguage::Cpp => "c++",
            CodeLanguage::Go => "go",
            CodeLanguage::Ruby => "ruby",
            CodeLanguage::Swift => "swift",
            CodeLanguage::Kotlin => "kotlin",
            CodeLanguage::Rust => "rust",
            CodeLanguage::Shell => "shell",
            CodeLanguage::Scala => "scala",
            CodeLanguage::Sql => "sql",
            CodeLanguage::Html => "html",
            CodeLanguage::Css => "css",
            CodeLanguage::Json => "json",
            CodeLanguage::Yaml => "yaml",
            CodeLanguage::Markdown => "markdown",
            CodeLanguage::Mermaid => "mermaid",
            CodeLanguage::PlainText => "plaintext",
        }
    }

    /// Language name as the Notion API expects it
    pub fn notion_name(self) -> &'static str {
        match self {
            CodeLanguage::CSharp => "c#",
            CodeLanguage::Shell => "bash",
            CodeLanguage::PlainText => "plain text",
            other => other.tag(),
        }
    }

    /// Resolve a fence tag
    ///
    /// `js` is accepted as an alias for JavaScript. Anything unknown falls
    /// back to plain text.
    ///
    /// # Parameters
    /// * `tag` - The fence info word, e.g. `rust` in ```` ```rust ````
    pub fn from_tag(tag: &str) -> Self {
        if tag == "js" {
            return CodeLanguage::JavaScript;
        }

        match Self::ALL.iter().find(|lang| lang.tag() == tag) {
            Some(lang) => *lang,
            None => {
                if !tag.is_empty() {
                    log::debug!("Unsupported code language '{}', using plain text", tag);
                }
                CodeLanguage::PlainText
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_alias() {
        assert_eq!(CodeLanguage::from_tag("js"), CodeLanguage::JavaScript);
        assert_eq!(CodeLanguage::from_tag("javascript"), CodeLanguage::JavaScript);
    }

    #[test]
    fn test_unknown_tag_degrades_to_plain_text() {
        assert_eq!(CodeLanguage::from_tag("cobol"), CodeLanguage::PlainText);
        assert_eq!(CodeLanguage::from_tag(""), CodeLanguage::PlainText);
    }

    #[test]
    fn test_notion_names() {
        assert_eq!(CodeLanguage::CSharp.notion_name(), "c#");
        assert_eq!(CodeLanguage::Cpp.notion_name(), "c++");
        assert_eq!(CodeLanguage::Shell.notion_name(), "bash");
        assert_eq!(CodeLanguage::PlainText.notion_name(), "plain text");
        assert_eq!(CodeLanguage::Rust.notion_name(), "rust");
    }

    #[test]
    fn test_every_tag_round_trips() {
        for lang in CodeLanguage::ALL {
            assert_eq!(CodeLanguage::from_tag(lang.tag()), lang);
        }
    }
}
