//! In-memory document model — an ordered list of headings and paragraphs.
//!
//! Formatters only ever append to a `GeneratedDocument`; a `DocumentWriter`
//! (see `docx.rs`) turns it into a file. Nothing here touches the filesystem.

use serde::Serialize;

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphStyle {
    #[default]
    Normal,
    ListBullet,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Justify,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub text: String,
    pub style: ParagraphStyle,
    pub alignment: Alignment,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: ParagraphStyle::Normal,
            alignment: Alignment::Left,
        }
    }

    pub fn bullet(mut self) -> Self {
        self.style = ParagraphStyle::ListBullet;
        self
    }

    pub fn justified(mut self) -> Self {
        self.alignment = Alignment::Justify;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Level 0 is the document title; 1 and up are section headings.
    Heading { text: String, level: u8 },
    Paragraph(Paragraph),
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedDocument {
    blocks: Vec<Block>,
}

impl GeneratedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_heading(&mut self, text: impl Into<String>, level: u8) -> &mut Self {
        self.blocks.push(Block::Heading {
            text: text.into(),
            level,
        });
        self
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) -> &mut Self {
        self.blocks.push(Block::Paragraph(paragraph));
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn headings(&self) -> Vec<(&str, u8)> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { text, level } => Some((text.as_str(), *level)),
                Block::Paragraph(_) => None,
            })
            .collect()
    }

    /// Text of every block in document order.
    pub fn texts(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .map(|b| match b {
                Block::Heading { text, .. } => text.as_str(),
                Block::Paragraph(p) => p.text.as_str(),
            })
            .collect()
    }

    /// Paragraphs between the heading with `heading_text` and the next heading.
    pub fn section(&self, heading_text: &str) -> Option<Vec<&Paragraph>> {
        let start = self.blocks.iter().position(
            |b| matches!(b, Block::Heading { text, .. } if text == heading_text),
        )?;
        Some(
            self.blocks[start + 1..]
                .iter()
                .map_while(|b| match b {
                    Block::Paragraph(p) => Some(p),
                    Block::Heading { .. } => None,
                })
                .collect(),
        )
    }
}
