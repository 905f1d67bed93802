//! Markdown event stream parser
//!
//! Converts pulldown-cmark's event stream into a flat sequence of elements.
//! Nested content (sub-lists, paragraphs inside list items) is carried by the
//! parent element.

mod inline;

use crate::element_model::{
    CalloutElement, CodeElement, CodeLanguage, Element, ListItemElement, ListKind, TableElement,
    TextContent, TextElement, TextLevel, TextStyles, TodoElement,
};
use inline::{paragraph_elements, plain_text, split_pieces, InlineBuffer};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Markdown to element tree parser
///
/// Tokenizer extensions are selected once, at construction.
pub struct MarkdownParser {
    options: Options,
}

impl MarkdownParser {
    /// Create a parser with tables, task lists, strikethrough and math enabled
    ///
    /// # Returns
    /// * `MarkdownParser` - A reusable parser
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_MATH);
        Self { options }
    }

    /// Parse markdown text into elements
    ///
    /// # Parameters
    /// * `markdown` - Raw markdown content
    ///
    /// # Returns
    /// * `Vec<Element>` - Top-level elements in document order
    pub fn parse(&self, markdown: &str) -> Vec<Element> {
        let mut state = ParseState::default();

        for event in Parser::new_ext(markdown, self.options) {
            state.process_event(event);
        }

        state.elements
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parser state for converting markdown events to elements
#[derive(Default)]
struct ParseState {
    /// Completed top-level elements
    elements: Vec<Element>,

    /// Stack of open lists and list items
    containers: Vec<Container>,

    /// Inline content of the paragraph, heading, cell or tight item being built
    inline: InlineBuffer,

    /// Level of the heading being built
    heading: Option<TextLevel>,

    /// Code block being captured
    code: Option<CodeCapture>,

    /// Block quote being captured as text
    quote: Option<QuoteCapture>,

    /// Table being built
    table: Option<TableCapture>,

    /// HTML block being captured
    html: Option<String>,
}

enum Container {
    List(ListKind),
    Item(ItemBuilder),
}

struct ItemBuilder {
    kind: ListKind,
    /// Set by a task list marker
    checked: Option<bool>,
    text: Option<TextContent>,
    children: Vec<Element>,
}

struct CodeCapture {
    language: String,
    text: String,
}

struct QuoteCapture {
    /// Nesting depth of block quotes inside the capture
    depth: usize,
    text: String,
}

impl QuoteCapture {
    /// End the current line group with exactly `count` newlines
    fn line_break(&mut self, count: usize) {
        let kept = self.text.trim_end_matches('\n').len();
        self.text.truncate(kept);
        if !self.text.is_empty() {
            self.text.push_str(&"\n".repeat(count));
        }
    }
}

#[derive(Default)]
struct TableCapture {
    rows: Vec<Vec<String>>,
    current_row: Vec<String>,
}

impl ParseState {
    /// Process a single markdown event
    fn process_event(&mut self, event: Event<'_>) {
        if self.quote.is_some() {
            self.process_quote_event(event);
            return;
        }

        if let Some(code) = self.code.as_mut() {
            match event {
                Event::Text(text) => code.text.push_str(&text),
                Event::End(TagEnd::CodeBlock) => self.finish_code_block(),
                _ => {}
            }
            return;
        }

        if let Some(html) = self.html.as_mut() {
            match event {
                Event::Html(text) | Event::Text(text) => html.push_str(&text),
                Event::End(TagEnd::HtmlBlock) => self.finish_html_block(),
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(tag) => self.handle_start_tag(tag),
            Event::End(tag_end) => self.handle_end_tag(tag_end),
            Event::Text(text) => self.inline.push_text(&text),
            Event::Code(code) => self.inline.push_code(&code),
            Event::InlineMath(math) => self.inline.push_inline_math(&math),
            Event::DisplayMath(math) => self.inline.push_display_math(&math),
            Event::SoftBreak | Event::HardBreak => self.inline.push_text("\n"),
            Event::Rule => {
                self.flush_item_text();
                self.emit(Element::Divider);
            }
            Event::TaskListMarker(checked) => self.handle_task_marker(checked),
            Event::Html(html) | Event::InlineHtml(html) => {
                log::debug!("Dropping inline HTML: {}", html.trim());
            }
            Event::FootnoteReference(label) => {
                log::debug!("Dropping footnote reference [^{}]", label);
            }
        }
    }

    /// Handle opening tags
    fn handle_start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.flush_item_text();
                self.inline.clear();
            }
            Tag::Heading { level, .. } => {
                self.flush_item_text();
                self.inline.clear();
                self.heading = Some(TextLevel::from_heading_depth(level as usize));
            }
            Tag::BlockQuote(_) => {
                self.flush_item_text();
                self.quote = Some(QuoteCapture {
                    depth: 1,
                    text: String::new(),
                });
            }
            Tag::CodeBlock(kind) => {
                self.flush_item_text();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_ascii_lowercase(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some(CodeCapture {
                    language,
                    text: String::new(),
                });
            }
            Tag::HtmlBlock => {
                self.flush_item_text();
                self.html = Some(String::new());
            }
            Tag::List(start) => {
                self.flush_item_text();
                let kind = match start {
                    Some(_) => ListKind::Numbered,
                    None => ListKind::Bulleted,
                };
                self.containers.push(Container::List(kind));
            }
            Tag::Item => {
                self.flush_item_text();
                self.inline.clear();
                let kind = self.current_list_kind();
                self.containers.push(Container::Item(ItemBuilder {
                    kind,
                    checked: None,
                    text: None,
                    children: Vec::new(),
                }));
            }
            Tag::Table(_) => {
                self.flush_item_text();
                self.table = Some(TableCapture::default());
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.current_row.clear();
                }
            }
            Tag::TableCell => self.inline.clear(),
            Tag::Emphasis => self.inline.start_span(TextStyles::italic()),
            Tag::Strong => self.inline.start_span(TextStyles::bold()),
            Tag::Strikethrough => self.inline.start_span(TextStyles::strikethrough()),
            Tag::Link {
                dest_url, title, ..
            } => self.inline.start_link(&dest_url, &title),
            Tag::Image {
                dest_url, title, ..
            } => self.inline.start_image(&dest_url, &title),
            // Rendered as their plain text
            Tag::Superscript | Tag::Subscript => {}
            // Extensions that are not enabled
            Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::MetadataBlock(_) => {}
        }
    }

    /// Handle closing tags
    fn handle_end_tag(&mut self, tag_end: TagEnd) {
        match tag_end {
            TagEnd::Paragraph => self.finish_paragraph(),
            TagEnd::Heading(_) => self.finish_heading(),
            TagEnd::List(_) => {
                self.containers.pop();
            }
            TagEnd::Item => self.finish_item(),
            TagEnd::Table => self.finish_table(),
            TagEnd::TableHead | TagEnd::TableRow => self.finish_table_row(),
            TagEnd::TableCell => self.finish_table_cell(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.inline.end_span(),
            TagEnd::Link => self.inline.end_link(),
            TagEnd::Image => self.inline.end_image(),
            _ => {}
        }
    }

    /// Route events into the block quote capture
    fn process_quote_event(&mut self, event: Event<'_>) {
        let Some(quote) = self.quote.as_mut() else {
            return;
        };

        match event {
            Event::Start(Tag::BlockQuote(_)) => quote.depth += 1,
            Event::End(TagEnd::BlockQuote(_)) => {
                quote.depth -= 1;
                if quote.depth == 0 {
                    self.finish_blockquote();
                }
            }
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock | TagEnd::HtmlBlock,
            )
            | Event::Rule => quote.line_break(2),
            Event::End(TagEnd::Item | TagEnd::TableHead | TagEnd::TableRow) => {
                quote.line_break(1)
            }
            Event::End(TagEnd::TableCell) => quote.text.push(' '),
            Event::Text(text)
            | Event::Code(text)
            | Event::InlineMath(text)
            | Event::DisplayMath(text)
            | Event::Html(text)
            | Event::InlineHtml(text) => quote.text.push_str(&text),
            Event::SoftBreak | Event::HardBreak => quote.text.push('\n'),
            Event::TaskListMarker(checked) => {
                quote.text.push_str(if checked { "[x] " } else { "[ ] " })
            }
            _ => {}
        }
    }

    /// Handle a task list marker by turning the open item into a to-do
    fn handle_task_marker(&mut self, checked: bool) {
        if let Some(Container::Item(item)) = self.containers.last_mut() {
            item.checked = Some(checked);
        }
    }

    fn finish_paragraph(&mut self) {
        let pieces = self.inline.take();
        let mut elements = paragraph_elements(pieces).into_iter().peekable();

        // The first paragraph of a loose list item is the item's text
        if matches!(elements.peek(), Some(Element::Text(_))) && self.item_awaits_text() {
            if let Some(Element::Text(text)) = elements.next() {
                self.set_item_text(text.content);
            }
        }

        for element in elements {
            self.emit(element);
        }
    }

    fn finish_heading(&mut self) {
        let pieces = self.inline.take();
        let level = self.heading.take().unwrap_or(TextLevel::Paragraph);
        let text = plain_text(&pieces).trim().to_string();

        self.emit(Element::Text(TextElement {
            content: TextContent::Plain(text),
            level,
        }));
    }

    fn finish_item(&mut self) {
        self.flush_item_text();

        let Some(Container::Item(item)) = self.containers.pop() else {
            return;
        };

        let text = item.text.unwrap_or_default();
        let element = match item.checked {
            Some(checked) => Element::Todo(TodoElement {
                text,
                checked,
                children: item.children,
            }),
            None => Element::ListItem(ListItemElement {
                text,
                kind: item.kind,
                children: item.children,
            }),
        };
        self.emit(element);
    }

    fn finish_blockquote(&mut self) {
        let Some(quote) = self.quote.take() else {
            return;
        };

        let text = quote.text.trim();
        let element = if CalloutElement::is_special_callout_text(text) {
            Element::Callout(CalloutElement::new(text, None))
        } else {
            Element::Quote {
                text: text.to_string(),
            }
        };
        self.emit(element);
    }

    fn finish_code_block(&mut self) {
        let Some(code) = self.code.take() else {
            return;
        };

        let body = code.text.strip_suffix('\n').unwrap_or(&code.text);
        self.emit(Element::Code(CodeElement {
            code: body.to_string(),
            language: CodeLanguage::from_tag(&code.language),
        }));
    }

    fn finish_html_block(&mut self) {
        let Some(html) = self.html.take() else {
            return;
        };

        self.emit(Element::Html {
            html: html.trim_end().to_string(),
        });
    }

    fn finish_table(&mut self) {
        let Some(table) = self.table.take() else {
            return;
        };
        self.emit(Element::Table(TableElement { rows: table.rows }));
    }

    fn finish_table_row(&mut self) {
        if let Some(table) = self.table.as_mut() {
            let row = std::mem::take(&mut table.current_row);
            table.rows.push(row);
        }
    }

    fn finish_table_cell(&mut self) {
        let pieces = self.inline.take();
        if let Some(table) = self.table.as_mut() {
            table.current_row.push(plain_text(&pieces).trim().to_string());
        }
    }

    /// Move inline content collected directly inside a tight list item
    /// into that item
    fn flush_item_text(&mut self) {
        if self.inline.is_empty() {
            return;
        }

        if !matches!(self.containers.last(), Some(Container::Item(_))) {
            self.inline.clear();
            return;
        }

        let (nodes, extras) = split_pieces(self.inline.take());
        if !nodes.is_empty() {
            if self.item_awaits_text() {
                self.set_item_text(TextContent::Rich(nodes));
            } else {
                self.emit(Element::Text(TextElement {
                    content: TextContent::Rich(nodes),
                    level: TextLevel::Paragraph,
                }));
            }
        }

        for extra in extras {
            self.emit(extra);
        }
    }

    fn item_awaits_text(&self) -> bool {
        matches!(
            self.containers.last(),
            Some(Container::Item(item)) if item.text.is_none() && item.children.is_empty()
        )
    }

    fn set_item_text(&mut self, text: TextContent) {
        if let Some(Container::Item(item)) = self.containers.last_mut() {
            item.text = Some(text);
        }
    }

    fn current_list_kind(&self) -> ListKind {
        self.containers
            .iter()
            .rev()
            .find_map(|container| match container {
                Container::List(kind) => Some(*kind),
                Container::Item(_) => None,
            })
            .unwrap_or(ListKind::Bulleted)
    }

    /// Add a finished element to the innermost open list item, or to the
    /// top level
    fn emit(&mut self, element: Element) {
        let parent = self
            .containers
            .iter_mut()
            .rev()
            .find_map(|container| match container {
                Container::Item(item) => Some(item),
                Container::List(_) => None,
            });

        match parent {
            Some(item) => item.children.push(element),
            None => self.elements.push(element),
        }
    }
}
