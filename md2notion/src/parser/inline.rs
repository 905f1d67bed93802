//! Inline content collection
//!
//! Collects the inline events of one paragraph, heading, table cell or tight
//! list item. Only the outermost style span produces a leaf; spans nested
//! inside it fold their text into it.

use crate::element_model::{
    Element, EquationElement, ImageElement, InlineNode, LinkElement, TextContent, TextElement,
    TextLevel, TextRun, TextStyles,
};

/// A collected inline item
#[derive(Debug, Clone)]
pub(super) enum Piece {
    Node(InlineNode),
    Image(ImageElement),
    DisplayMath(String),
}

struct SpanCapture {
    styles: TextStyles,
    depth: usize,
    text: String,
}

struct LinkCapture {
    url: String,
    title: Option<String>,
    text: String,
}

struct ImageCapture {
    url: String,
    title: Option<String>,
    alt: String,
}

/// Inline state of the block being built
#[derive(Default)]
pub(super) struct InlineBuffer {
    pieces: Vec<Piece>,
    span: Option<SpanCapture>,
    link: Option<LinkCapture>,
    image: Option<ImageCapture>,
}

impl InlineBuffer {
    pub(super) fn is_empty(&self) -> bool {
        self.pieces.is_empty()
            && self.span.as_ref().is_none_or(|span| span.text.is_empty())
            && self.link.is_none()
            && self.image.is_none()
    }

    pub(super) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Take the collected pieces, leaving the buffer empty
    pub(super) fn take(&mut self) -> Vec<Piece> {
        std::mem::take(self).pieces
    }

    pub(super) fn push_text(&mut self, text: &str) {
        if let Some(image) = self.image.as_mut() {
            image.alt.push_str(text);
        } else if let Some(link) = self.link.as_mut() {
            link.text.push_str(text);
        } else if let Some(span) = self.span.as_mut() {
            span.text.push_str(text);
        } else {
            match self.pieces.last_mut() {
                Some(Piece::Node(InlineNode::Text(run))) if !run.styles.is_styled() => {
                    run.text.push_str(text)
                }
                _ => self
                    .pieces
                    .push(Piece::Node(InlineNode::Text(TextRun::new(text)))),
            }
        }
    }

    pub(super) fn push_code(&mut self, code: &str) {
        if self.is_capturing() {
            self.push_text(code);
            return;
        }
        self.pieces.push(Piece::Node(InlineNode::Text(TextRun::styled(
            code,
            TextStyles::code(),
        ))));
    }

    pub(super) fn push_inline_math(&mut self, expression: &str) {
        if self.is_capturing() {
            self.push_text(expression);
            return;
        }
        self.pieces
            .push(Piece::Node(InlineNode::Equation(EquationElement::new(expression))));
    }

    pub(super) fn push_display_math(&mut self, expression: &str) {
        if self.is_capturing() {
            self.push_text(expression);
            return;
        }
        self.pieces
            .push(Piece::DisplayMath(expression.trim().to_string()));
    }

    pub(super) fn start_span(&mut self, styles: TextStyles) {
        if let Some(span) = self.span.as_mut() {
            span.depth += 1;
            return;
        }
        // Styles inside link text are not kept
        if self.link.is_some() || self.image.is_some() {
            return;
        }
        self.span = Some(SpanCapture {
            styles,
            depth: 1,
            text: String::new(),
        });
    }

    pub(super) fn end_span(&mut self) {
        let Some(span) = self.span.as_mut() else {
            return;
        };

        span.depth -= 1;
        if span.depth > 0 {
            return;
        }

        if let Some(span) = self.span.take() {
            if !span.text.is_empty() {
                self.pieces.push(Piece::Node(InlineNode::Text(TextRun::styled(
                    span.text,
                    span.styles,
                ))));
            }
        }
    }

    pub(super) fn start_link(&mut self, url: &str, title: &str) {
        // A link inside a span ends the span's current leaf
        if let Some(span) = self.span.as_mut() {
            if !span.text.is_empty() {
                let text = std::mem::take(&mut span.text);
                let styles = span.styles;
                self.pieces
                    .push(Piece::Node(InlineNode::Text(TextRun::styled(text, styles))));
            }
        }

        self.link = Some(LinkCapture {
            url: url.to_string(),
            title: non_empty(title),
            text: String::new(),
        });
    }

    pub(super) fn end_link(&mut self) {
        let Some(link) = self.link.take() else {
            return;
        };

        self.pieces.push(Piece::Node(InlineNode::Link(LinkElement {
            url: link.url,
            text: link.text,
            caption: link.title,
        })));
    }

    pub(super) fn start_image(&mut self, url: &str, title: &str) {
        self.image = Some(ImageCapture {
            url: url.to_string(),
            title: non_empty(title),
            alt: String::new(),
        });
    }

    pub(super) fn end_image(&mut self) {
        let Some(image) = self.image.take() else {
            return;
        };

        self.pieces.push(Piece::Image(ImageElement {
            url: image.url,
            caption: non_empty(&image.alt).or(image.title),
        }));
    }

    fn is_capturing(&self) -> bool {
        self.span.is_some() || self.link.is_some() || self.image.is_some()
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn is_blank(piece: &Piece) -> bool {
    matches!(
        piece,
        Piece::Node(InlineNode::Text(run)) if !run.styles.is_styled() && run.text.trim().is_empty()
    )
}

/// Concatenated text of the pieces, ignoring styles
pub(super) fn plain_text(pieces: &[Piece]) -> String {
    pieces
        .iter()
        .map(|piece| match piece {
            Piece::Node(InlineNode::Text(run)) => run.text.as_str(),
            Piece::Node(InlineNode::Link(link)) => link.text.as_str(),
            Piece::Node(InlineNode::Equation(eq)) => eq.expression.as_str(),
            Piece::Image(image) => image.caption.as_deref().unwrap_or_default(),
            Piece::DisplayMath(expression) => expression.as_str(),
        })
        .collect()
}

/// Split pieces into rich text leaves and the elements that cannot live
/// inside rich text
///
/// Images become elements of their own. Display math stays inline as an
/// equation leaf.
pub(super) fn split_pieces(pieces: Vec<Piece>) -> (Vec<InlineNode>, Vec<Element>) {
    let mut nodes = Vec::new();
    let mut extras = Vec::new();

    for piece in pieces {
        match piece {
            Piece::Node(node) => nodes.push(node),
            Piece::Image(image) => {
                log::debug!("Image {} inside text moved to its own block", image.url);
                extras.push(Element::Image(image));
            }
            Piece::DisplayMath(expression) => {
                nodes.push(InlineNode::Equation(EquationElement::new(expression)));
            }
        }
    }

    if nodes.iter().all(|node| {
        matches!(node, InlineNode::Text(run) if !run.styles.is_styled() && run.text.trim().is_empty())
    }) {
        nodes.clear();
    }

    (nodes, extras)
}

/// Elements produced by one paragraph
///
/// A paragraph that holds nothing but an image, a display equation, or a
/// `!bookmark`/`!embed` link becomes that element. Anything else is a rich
/// text paragraph.
pub(super) fn paragraph_elements(pieces: Vec<Piece>) -> Vec<Element> {
    let mut significant = pieces.iter().filter(|piece| !is_blank(piece));
    if let (Some(only), None) = (significant.next(), significant.next()) {
        if let Some(element) = standalone_element(only) {
            return vec![element];
        }
    }

    let (nodes, extras) = split_pieces(pieces);
    let mut elements = Vec::with_capacity(extras.len() + 1);
    if !nodes.is_empty() {
        elements.push(Element::Text(TextElement {
            content: TextContent::Rich(nodes),
            level: TextLevel::Paragraph,
        }));
    }
    elements.extend(extras);
    elements
}

fn standalone_element(piece: &Piece) -> Option<Element> {
    match piece {
        Piece::Image(image) => Some(Element::Image(image.clone())),
        Piece::DisplayMath(expression) => {
            Some(Element::Equation(EquationElement::new(expression.clone())))
        }
        Piece::Node(InlineNode::Link(link)) => match link.text.trim() {
            "!bookmark" => Some(Element::Bookmark {
                url: link.url.clone(),
            }),
            "!embed" => Some(Element::Embed {
                url: link.url.clone(),
            }),
            _ => None,
        },
        Piece::Node(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_merges() {
        let mut buffer = InlineBuffer::default();
        buffer.push_text("a");
        buffer.push_text("b");

        let pieces = buffer.take();

        assert_eq!(pieces.len(), 1);
        assert_eq!(plain_text(&pieces), "ab");
    }

    #[test]
    fn test_link_inside_span_splits_span() {
        // Arrange
        let mut buffer = InlineBuffer::default();

        // Act: **before [link](u) after**
        buffer.start_span(TextStyles::bold());
        buffer.push_text("before ");
        buffer.start_link("u", "");
        buffer.push_text("link");
        buffer.end_link();
        buffer.push_text(" after");
        buffer.end_span();
        let (nodes, extras) = split_pieces(buffer.take());

        // Assert
        assert!(extras.is_empty());
        assert_eq!(
            nodes,
            vec![
                InlineNode::Text(TextRun::styled("before ", TextStyles::bold())),
                InlineNode::Link(LinkElement::new("u", "link")),
                InlineNode::Text(TextRun::styled(" after", TextStyles::bold())),
            ]
        );
    }

    #[test]
    fn test_empty_span_produces_nothing() {
        let mut buffer = InlineBuffer::default();
        buffer.start_span(TextStyles::italic());
        buffer.end_span();

        assert!(buffer.take().is_empty());
    }

    #[test]
    fn test_whitespace_only_paragraph_is_dropped() {
        let elements = paragraph_elements(vec![Piece::Node(InlineNode::Text(TextRun::new(" ")))]);
        assert!(elements.is_empty());
    }

    #[test]
    fn test_image_caption_falls_back_to_title() {
        let mut buffer = InlineBuffer::default();
        buffer.start_image("https://x/y.png", "Title");
        buffer.end_image();

        let elements = paragraph_elements(buffer.take());

        match &elements[0] {
            Element::Image(image) => assert_eq!(image.caption.as_deref(), Some("Title")),
            other => panic!("Expected image, got {:?}", other),
        }
    }
}
