// ABOUTME: Markdown rendering of completion text into typed display blocks
// ABOUTME: Code blocks carry their language and a copy payload; also renders plain terminal text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Completion text is markdown. The assistant and history views show it as
//! headings, paragraphs, lists, quotes, tables, and code blocks, each code
//! block with its own copy action. Blocks nested in a list item or quote stay
//! inside it so document order survives.

use std::mem;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// A fenced or indented code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Info-string language, if any
    pub language: Option<String>,
    /// Block contents as written
    pub code: String,
}

impl CodeBlock {
    /// Text placed on the clipboard by the block's copy action
    #[must_use]
    pub fn copy_text(&self) -> &str {
        self.code.strip_suffix('\n').unwrap_or(&self.code)
    }
}

/// One list entry and the blocks nested under it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    /// Item contents in document order; tight items hold a single paragraph
    pub blocks: Vec<Block>,
}

/// One rendered element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#`..`######` heading
    Heading {
        /// 1 through 6
        level: u8,
        /// Heading text
        text: String,
    },
    /// Paragraph text with inline markup flattened
    Paragraph(String),
    /// Bullet list when `start` is `None`, numbered otherwise
    List {
        /// First number of a numbered list
        start: Option<u64>,
        /// Entries, each with its own nested blocks
        items: Vec<ListItem>,
    },
    /// Code block
    Code(CodeBlock),
    /// Block quote and the blocks inside it
    Quote(Vec<Block>),
    /// Pipe table
    Table {
        /// Header cell texts
        header: Vec<String>,
        /// Body rows of cell texts
        rows: Vec<Vec<String>>,
    },
    /// Horizontal rule
    Rule,
}

/// Parsed completion text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedMarkdown {
    /// Blocks in document order
    pub blocks: Vec<Block>,
}

impl RenderedMarkdown {
    /// Parse `text` as `CommonMark` with tables and strikethrough
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut opts = Options::empty();
        opts.insert(Options::ENABLE_TABLES);
        opts.insert(Options::ENABLE_STRIKETHROUGH);

        let mut builder = BlockBuilder::default();
        for event in Parser::new_ext(text, opts) {
            builder.event(event);
        }
        builder.finish()
    }

    /// Every code block in document order, including those nested in lists and quotes
    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        let mut found = Vec::new();
        collect_code(&self.blocks, &mut found);
        found.into_iter()
    }

    /// Plain-text rendering for terminals
    #[must_use]
    pub fn to_terminal(&self) -> String {
        render_blocks(&self.blocks, "\n\n")
    }
}

fn collect_code<'a>(blocks: &'a [Block], found: &mut Vec<&'a CodeBlock>) {
    for block in blocks {
        match block {
            Block::Code(code) => found.push(code),
            Block::List { items, .. } => {
                for item in items {
                    collect_code(&item.blocks, found);
                }
            }
            Block::Quote(inner) => collect_code(inner, found),
            _ => {}
        }
    }
}

fn render_blocks(blocks: &[Block], separator: &str) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join(separator)
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => {
            format!("{} {text}", "#".repeat(usize::from(*level)))
        }
        Block::Paragraph(text) => text.clone(),
        Block::List { start, items } => render_list(*start, items),
        Block::Code(code) => format!(
            "```{}\n{}\n```",
            code.language.as_deref().unwrap_or_default(),
            code.copy_text()
        ),
        Block::Quote(inner) => render_blocks(inner, "\n\n")
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_owned()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Block::Table { header, rows } => {
            let row = |cells: &[String]| format!("| {} |", cells.join(" | "));
            let mut lines = vec![
                row(header),
                format!("|{}|", vec![" --- "; header.len()].join("|")),
            ];
            lines.extend(rows.iter().map(|cells| row(cells.as_slice())));
            lines.join("\n")
        }
        Block::Rule => "---".to_owned(),
    }
}

// Continuation lines of an item are indented past its marker
fn render_list(start: Option<u64>, items: &[ListItem]) -> String {
    let mut lines = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let marker = start.map_or_else(|| "-".to_owned(), |n| format!("{}.", n + i as u64));
        let indent = " ".repeat(marker.len() + 1);
        let body = render_blocks(&item.blocks, "\n");
        let mut body_lines = body.lines();
        lines.push(
            body_lines
                .next()
                .map_or_else(|| marker.clone(), |first| format!("{marker} {first}")),
        );
        for line in body_lines {
            lines.push(if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            });
        }
    }
    lines.join("\n")
}

const fn heading_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Open block containers, innermost last
enum Container {
    Quote(Vec<Block>),
    List {
        start: Option<u64>,
        items: Vec<ListItem>,
    },
    Item(Vec<Block>),
}

#[derive(Default)]
struct TableRows {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    open: Vec<Container>,
    text: String,
    heading: Option<u8>,
    code: Option<CodeBlock>,
    table: Option<TableRows>,
}

impl BlockBuilder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => match self.code.as_mut() {
                Some(block) => block.code.push_str(&text),
                None => self.text.push_str(&text),
            },
            Event::Code(code) => {
                self.text.push('`');
                self.text.push_str(&code);
                self.text.push('`');
            }
            Event::Html(html) | Event::InlineHtml(html) => self.text.push_str(&html),
            Event::SoftBreak => self.text.push(' '),
            Event::HardBreak => self.text.push('\n'),
            Event::Rule => {
                self.flush_text();
                self.emit(Block::Rule);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.flush_text(),
            Tag::Heading { level, .. } => {
                self.flush_text();
                self.heading = Some(heading_number(level));
            }
            Tag::CodeBlock(kind) => {
                self.flush_text();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(CodeBlock {
                    language,
                    code: String::new(),
                });
            }
            Tag::List(start) => {
                self.flush_text();
                self.open.push(Container::List {
                    start,
                    items: Vec::new(),
                });
            }
            Tag::Item => self.open.push(Container::Item(Vec::new())),
            Tag::BlockQuote(_) => {
                self.flush_text();
                self.open.push(Container::Quote(Vec::new()));
            }
            Tag::Table(_) => {
                self.flush_text();
                self.table = Some(TableRows::default());
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                let level = self.heading.take().unwrap_or(1);
                let text = self.take_text();
                self.emit(Block::Heading { level, text });
            }
            TagEnd::Paragraph | TagEnd::HtmlBlock => self.flush_text(),
            TagEnd::CodeBlock => {
                if let Some(block) = self.code.take() {
                    self.emit(Block::Code(block));
                }
            }
            TagEnd::Item => {
                self.flush_text();
                if let Some(Container::Item(blocks)) = self.open.pop() {
                    if let Some(Container::List { items, .. }) = self.open.last_mut() {
                        items.push(ListItem { blocks });
                    }
                }
            }
            TagEnd::List(_) => {
                self.flush_text();
                if let Some(Container::List { start, items }) = self.open.pop() {
                    self.emit(Block::List { start, items });
                }
            }
            TagEnd::BlockQuote(_) => {
                self.flush_text();
                if let Some(Container::Quote(blocks)) = self.open.pop() {
                    self.emit(Block::Quote(blocks));
                }
            }
            TagEnd::TableCell => {
                let cell = self.take_text();
                if let Some(table) = self.table.as_mut() {
                    table.row.push(cell);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = mem::take(&mut table.row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.emit(Block::Table {
                        header: table.header,
                        rows: table.rows,
                    });
                }
            }
            _ => {}
        }
    }

    /// Append to the innermost open quote or list item, else the document
    fn emit(&mut self, block: Block) {
        let container = self.open.iter_mut().rev().find_map(|open| match open {
            Container::Quote(blocks) | Container::Item(blocks) => Some(blocks),
            Container::List { .. } => None,
        });
        container.unwrap_or(&mut self.blocks).push(block);
    }

    fn flush_text(&mut self) {
        let text = self.take_text();
        if !text.is_empty() {
            self.emit(Block::Paragraph(text));
        }
    }

    fn take_text(&mut self) -> String {
        mem::take(&mut self.text).trim().to_owned()
    }

    fn finish(mut self) -> RenderedMarkdown {
        self.flush_text();
        RenderedMarkdown {
            blocks: self.blocks,
        }
    }
}
