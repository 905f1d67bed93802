//! Rich text conversion
//!
//! Notion rejects text objects longer than 2000 characters, so every text
//! leaf is split into consecutive chunks of at most that length.

use crate::block_model::{Annotations, EquationObject, Link, RichText, TextObject};
use crate::element_model::{InlineNode, TextContent, TextStyles};
use itertools::Itertools;

/// Maximum number of characters in one text object
pub const MAX_TEXT_LENGTH: usize = 2000;

/// Convert element text content to rich text
///
/// Plain strings produce unstyled text objects without annotations. Rich
/// sequences keep styles, links and equations.
pub fn rich_text(content: &TextContent) -> Vec<RichText> {
    match content {
        TextContent::Plain(text) => plain_rich_text(text),
        TextContent::Rich(nodes) => inline_rich_text(nodes),
    }
}

/// Convert a plain string to unstyled rich text
pub fn plain_rich_text(text: &str) -> Vec<RichText> {
    split_text(text).into_iter().map(RichText::plain).collect()
}

/// Convert inline leaves to rich text
pub fn inline_rich_text(nodes: &[InlineNode]) -> Vec<RichText> {
    nodes.iter().flat_map(inline_node_rich_text).collect()
}

fn inline_node_rich_text(node: &InlineNode) -> Vec<RichText> {
    match node {
        InlineNode::Text(run) => split_text(&run.text)
            .into_iter()
            .map(|content| RichText::Text {
                text: TextObject {
                    content,
                    link: None,
                },
                annotations: Some(annotations(&run.styles)),
            })
            .collect(),
        InlineNode::Link(link) => {
            let target = link_target(&link.url);
            split_text(&link.text)
                .into_iter()
                .map(|content| RichText::Text {
                    text: TextObject {
                        content,
                        link: Some(target.clone()),
                    },
                    annotations: None,
                })
                .collect()
        }
        InlineNode::Equation(eq) => vec![RichText::Equation {
            equation: EquationObject {
                expression: eq.expression.clone(),
            },
            annotations: Some(annotations(&eq.styles)),
        }],
    }
}

/// Link target for a URL; only `http` URLs are attached
pub fn link_target(url: &str) -> Link {
    if url.starts_with("http") {
        Link::Url {
            url: url.to_string(),
        }
    } else {
        log::debug!("Link target '{}' is not an http URL, dropping link", url);
        Link::Unlinked
    }
}

fn annotations(styles: &TextStyles) -> Annotations {
    Annotations {
        bold: styles.bold,
        italic: styles.italic,
        strikethrough: styles.strikethrough,
        underline: styles.underline,
        code: styles.code,
    }
}

/// Split text into chunks of at most [`MAX_TEXT_LENGTH`] characters
///
/// Splitting counts characters, not bytes, and ignores word boundaries.
/// Empty text yields no chunks.
pub fn split_text(text: &str) -> Vec<String> {
    text.chars()
        .chunks(MAX_TEXT_LENGTH)
        .into_iter()
        .map(|chunk| chunk.collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element_model::{EquationElement, LinkElement, TextRun};

    #[test]
    fn test_split_text_chunk_count_and_lengths() {
        // Arrange
        let text = "a".repeat(4500);

        // Act
        let chunks = split_text(&text);

        // Assert
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 2000);
        assert_eq!(chunks[1].chars().count(), 2000);
        assert_eq!(chunks[2].chars().count(), 500);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_split_text_counts_characters_not_bytes() {
        let text = "é".repeat(2001);

        let chunks = split_text(&text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1], "é");
    }

    #[test]
    fn test_split_text_exact_boundary_and_empty() {
        assert_eq!(split_text(&"x".repeat(2000)).len(), 1);
        assert!(split_text("").is_empty());
    }

    #[test]
    fn test_plain_string_has_no_annotations() {
        let rich = rich_text(&TextContent::Plain("hello".to_string()));
        assert_eq!(rich, vec![RichText::plain("hello")]);
    }

    #[test]
    fn test_styled_leaf_split_keeps_annotations() {
        let nodes = vec![InlineNode::Text(TextRun::styled(
            "b".repeat(2500),
            TextStyles::bold(),
        ))];

        let rich = inline_rich_text(&nodes);

        assert_eq!(rich.len(), 2);
        for item in &rich {
            match item {
                RichText::Text { annotations, .. } => {
                    assert_eq!(annotations.map(|a| a.bold), Some(true))
                }
                other => panic!("Expected text, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_link_targets() {
        let nodes = vec![
            InlineNode::Link(LinkElement::new("https://example.com", "web")),
            InlineNode::Link(LinkElement::new("./local.md", "local")),
        ];

        let rich = inline_rich_text(&nodes);

        match (&rich[0], &rich[1]) {
            (RichText::Text { text: web, .. }, RichText::Text { text: local, .. }) => {
                assert_eq!(
                    web.link,
                    Some(Link::Url {
                        url: "https://example.com".to_string()
                    })
                );
                assert_eq!(local.link, Some(Link::Unlinked));
                assert_eq!(local.content, "local");
            }
            other => panic!("Expected two text objects, got {:?}", other),
        }
    }

    #[test]
    fn test_equation_leaf() {
        let rich = inline_rich_text(&[InlineNode::Equation(EquationElement::new("x^2"))]);

        assert_eq!(rich.len(), 1);
        assert!(matches!(
            &rich[0],
            RichText::Equation { equation, annotations: Some(_) } if equation.expression == "x^2"
        ));
    }
}
