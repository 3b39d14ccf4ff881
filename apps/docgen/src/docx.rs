//! Docx backend — turns a `GeneratedDocument` into a `.docx` file on disk.
//!
//! `DocumentWriter` is the seam between formatters and the file format.
//! `DocxWriter` is the only production backend; tests swap in doubles.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat,
    Numbering, NumberingId, Run, SpecialIndentType, Start, Style, StyleType,
};
use tracing::{debug, info};

use crate::document::{Alignment, Block, GeneratedDocument, Paragraph, ParagraphStyle};
use crate::errors::DocgenError;

/// Numbering id bound to the `ListBullet` style. Id 1 is left to the library defaults.
const BULLET_NUMBERING_ID: usize = 2;
const LIST_BULLET_STYLE: &str = "ListBullet";

/// Style id, display name and font size (half-points), indexed by heading level.
/// Levels past the end reuse the last entry.
const HEADING_STYLES: &[(&str, &str, usize)] = &[
    ("Title", "Title", 56),
    ("Heading1", "Heading 1", 32),
];

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Serializes a finished document to an already-resolved path.
/// Implement this to swap the output format without touching the formatters.
pub trait DocumentWriter {
    fn write(&self, document: &GeneratedDocument, path: &Path) -> Result<(), DocgenError>;
}

// ────────────────────────────────────────────────────────────────────────────
// DocxWriter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct DocxWriter;

impl DocxWriter {
    /// Builds the `docx_rs` object tree for `document` without writing anything.
    pub fn to_docx(&self, document: &GeneratedDocument) -> Docx {
        let docx = register_styles(Docx::new());
        document
            .blocks()
            .iter()
            .fold(docx, |docx, block| docx.add_paragraph(convert_block(block)))
    }
}

impl DocumentWriter for DocxWriter {
    fn write(&self, document: &GeneratedDocument, path: &Path) -> Result<(), DocgenError> {
        let file = File::create(path).map_err(|e| DocgenError::io(path, e))?;
        self.to_docx(document)
            .build()
            .pack(file)
            .map_err(|e| DocgenError::Packaging(e.to_string()))?;
        debug!("Packed {} blocks into {}", document.blocks().len(), path.display());
        Ok(())
    }
}

fn register_styles(docx: Docx) -> Docx {
    let docx = HEADING_STYLES.iter().fold(docx, |docx, (id, name, size)| {
        docx.add_style(
            Style::new(*id, StyleType::Paragraph)
                .name(*name)
                .size(*size)
                .bold(),
        )
    });

    docx.add_style(Style::new(LIST_BULLET_STYLE, StyleType::Paragraph).name("List Bullet"))
        .add_abstract_numbering(
            AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
                Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("bullet"),
                    LevelText::new("•"),
                    LevelJc::new("left"),
                )
                .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None),
            ),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
}

fn heading_style(level: u8) -> &'static str {
    let index = usize::from(level).min(HEADING_STYLES.len() - 1);
    HEADING_STYLES[index].0
}

fn convert_block(block: &Block) -> docx_rs::Paragraph {
    match block {
        Block::Heading { text, level } => docx_rs::Paragraph::new()
            .add_run(Run::new().add_text(text.as_str()))
            .style(heading_style(*level)),
        Block::Paragraph(paragraph) => convert_paragraph(paragraph),
    }
}

fn convert_paragraph(paragraph: &Paragraph) -> docx_rs::Paragraph {
    let mut out = docx_rs::Paragraph::new().add_run(Run::new().add_text(paragraph.text.as_str()));
    if paragraph.style == ParagraphStyle::ListBullet {
        out = out
            .style(LIST_BULLET_STYLE)
            .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0));
    }
    if paragraph.alignment == Alignment::Justify {
        out = out.align(AlignmentType::Both);
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Output path handling
// ────────────────────────────────────────────────────────────────────────────

/// Makes `out` absolute against the current directory and folds `.` and `..`
/// lexically, without touching the filesystem.
pub fn resolve_output_path(out: &Path) -> Result<PathBuf, DocgenError> {
    let absolute = std::path::absolute(out).map_err(|e| DocgenError::io(out, e))?;
    Ok(normalize_lexically(&absolute))
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Creates the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<(), DocgenError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|e| DocgenError::io(parent, e))?;
    info!("Created output directory {}", parent.display());
    Ok(())
}

/// Resolves `out`, creates its parent directory if needed, and writes `document` there.
/// An existing file at that path is overwritten. Returns the absolute path written.
pub fn save_document(
    writer: &dyn DocumentWriter,
    document: &GeneratedDocument,
    out: &Path,
) -> Result<PathBuf, DocgenError> {
    let path = resolve_output_path(out)?;
    ensure_parent_dir(&path)?;
    writer.write(document, &path)?;
    info!("Saved document to {}", path.display());
    Ok(path)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Read;

    use super::*;

    /// Reads a saved `.docx` back and returns the text of every paragraph.
    pub(crate) fn read_paragraph_texts(path: &Path) -> Vec<String> {
        let mut buffer = Vec::new();
        File::open(path)
            .unwrap()
            .read_to_end(&mut buffer)
            .unwrap();
        let document = docx_rs::read_docx(&buffer).unwrap();

        let mut texts = Vec::new();
        for child in &document.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                let mut text = String::new();
                for run in &p.children {
                    if let docx_rs::ParagraphChild::Run(r) = run {
                        for node in &r.children {
                            if let docx_rs::RunChild::Text(t) = node {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                texts.push(text);
            }
        }
        texts
    }

    fn sample() -> GeneratedDocument {
        let mut doc = GeneratedDocument::new();
        doc.add_heading("CV pour: Dev", 0)
            .add_heading("Experiences:", 1)
            .add_paragraph(Paragraph::new("Backend").bullet())
            .add_paragraph(Paragraph::new("Wrote services").justified());
        doc
    }

    #[test]
    fn test_heading_style_mapping() {
        assert_eq!(heading_style(0), "Title");
        assert_eq!(heading_style(1), "Heading1");
        // deeper levels fall back to a registered style
        assert_eq!(heading_style(4), "Heading1");
    }

    #[test]
    fn test_every_emitted_heading_style_is_registered() {
        for level in 0..=5u8 {
            let style = heading_style(level);
            assert!(HEADING_STYLES.iter().any(|(id, _, _)| *id == style));
        }
    }

    #[test]
    fn test_written_file_reads_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        DocxWriter.write(&sample(), &path).unwrap();
        assert_eq!(
            read_paragraph_texts(&path),
            vec!["CV pour: Dev", "Experiences:", "Backend", "Wrote services"]
        );
    }

    #[test]
    fn test_paragraph_properties_carry_styles() {
        let docx = DocxWriter.to_docx(&sample());
        let styles: Vec<Option<String>> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                docx_rs::DocumentChild::Paragraph(p) => {
                    Some(p.property.style.as_ref().map(|s| s.val.clone()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            styles,
            vec![
                Some("Title".to_string()),
                Some("Heading1".to_string()),
                Some("ListBullet".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_save_creates_missing_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("deeper").join("cv.docx");
        let written = save_document(&DocxWriter, &sample(), &out).unwrap();
        assert_eq!(written, out);
        assert!(out.exists());

        // Second save into the now-existing directory must not fail.
        save_document(&DocxWriter, &sample(), &out).unwrap();
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cv.docx");
        save_document(&DocxWriter, &sample(), &out).unwrap();

        let mut second = GeneratedDocument::new();
        second.add_heading("Offre pour: Ops", 0);
        save_document(&DocxWriter, &second, &out).unwrap();

        assert_eq!(read_paragraph_texts(&out), vec!["Offre pour: Ops"]);
    }

    #[test]
    fn test_resolve_relative_path_is_absolute() {
        let resolved = resolve_output_path(Path::new("profile.docx")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("profile.docx"));
    }

    #[test]
    fn test_resolve_folds_parent_and_current_dir() {
        let resolved = resolve_output_path(Path::new("/srv/./out/../cv/./profile.docx")).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/cv/profile.docx"));
        assert_eq!(
            resolve_output_path(Path::new("/../cv.docx")).unwrap(),
            PathBuf::from("/cv.docx")
        );
    }

    #[test]
    fn test_save_through_parent_dir_creates_no_stray_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("ghost").join("..").join("cv.docx");
        let written = save_document(&DocxWriter, &sample(), &out).unwrap();

        assert_eq!(written, dir.path().join("cv.docx"));
        assert!(!written
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::CurDir)));
        assert!(!dir.path().join("ghost").exists());
        assert!(written.exists());
    }

    #[test]
    fn test_target_that_is_a_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("is_a_dir");
        std::fs::create_dir(&target).unwrap();
        let err = save_document(&DocxWriter, &sample(), &target).unwrap_err();
        assert!(err.is_io());
        assert!(matches!(err, DocgenError::Io { .. }));
        assert!(target.is_dir());
    }

    #[test]
    fn test_parent_that_is_a_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a dir").unwrap();
        let err = save_document(&DocxWriter, &sample(), &blocker.join("sub").join("cv.docx"))
            .unwrap_err();
        assert!(err.is_io());
    }
}
