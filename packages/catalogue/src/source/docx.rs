//! Word (`.docx`) paragraph source.
//!
//! A `.docx` file is a ZIP container; the body text lives in
//! `word/document.xml` as a sequence of `w:p` paragraphs made of `w:r` runs.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use unicode_normalization::UnicodeNormalization;
use zip::ZipArchive;

use super::ParagraphSource;
use crate::error::{CatalogueError, Result};
use crate::types::{paragraphs_from, Paragraph};

/// WordprocessingML main namespace.
const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Archive entry holding the document body.
const DOCUMENT_ENTRY: &str = "word/document.xml";

/// Reads the top-level body paragraphs of a Word document.
#[derive(Debug, Clone)]
pub struct DocxSource {
    path: PathBuf,
}

impl DocxSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_document_xml(&self) -> Result<String> {
        let file = File::open(&self.path)?;
        let mut archive = ZipArchive::new(file)?;
        let mut entry = archive.by_name(DOCUMENT_ENTRY)?;
        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        Ok(xml)
    }
}

impl ParagraphSource for DocxSource {
    fn paragraphs(&self) -> Result<Vec<Paragraph>> {
        let xml = self.read_document_xml()?;
        let texts = paragraphs_from_document_xml(&xml)?;
        tracing::debug!(path = %self.path.display(), count = texts.len(), "Read document paragraphs");
        Ok(paragraphs_from(texts))
    }
}

fn is_word_element(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(WORD_NS)
}

/// Find the first WordprocessingML child element with the given name.
fn find_word_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| is_word_element(*child, name))
}

/// Extract the plain text of every top-level body paragraph.
///
/// Only direct `w:p` children of `w:body` count; table cells and other
/// nested content are skipped. Text runs are concatenated, tabs become
/// `\t` and line breaks `\n`. Results are NFC-normalized.
///
/// # Examples
/// ```
/// use eip_catalogue::source::paragraphs_from_document_xml;
///
/// let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
///   <w:body>
///     <w:p><w:r><w:t>Basel </w:t></w:r><w:r><w:t>1533</w:t></w:r></w:p>
///     <w:p/>
///   </w:body>
/// </w:document>"#;
/// assert_eq!(paragraphs_from_document_xml(xml).unwrap(), vec!["Basel 1533", ""]);
/// ```
pub fn paragraphs_from_document_xml(xml: &str) -> Result<Vec<String>> {
    let doc = Document::parse(xml)?;
    let body = find_word_child(doc.root_element(), "body").ok_or_else(|| {
        CatalogueError::MissingElement {
            element: "w:body".to_string(),
            context: DOCUMENT_ENTRY.to_string(),
        }
    })?;

    Ok(body
        .children()
        .filter(|child| is_word_element(*child, "p"))
        .map(paragraph_text)
        .collect())
}

fn paragraph_text(paragraph: Node<'_, '_>) -> String {
    let mut text = String::new();
    for node in paragraph.descendants() {
        if is_word_element(node, "t") {
            text.push_str(node.text().unwrap_or_default());
        } else if is_word_element(node, "tab") {
            text.push('\t');
        } else if is_word_element(node, "br") || is_word_element(node, "cr") {
            text.push('\n');
        }
    }
    text.nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn document(body: &str) -> String {
        format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WORD_NS}"><w:body>{body}</w:body></w:document>"#)
    }

    #[test]
    fn test_runs_are_concatenated() {
        let xml = document(
            "<w:p><w:pPr><w:pStyle w:val=\"Heading1\"/></w:pPr><w:r><w:t>Cata</w:t></w:r><w:r><w:t>logue</w:t></w:r></w:p>\
             <w:p><w:r><w:t xml:space=\"preserve\">Paris </w:t></w:r><w:r><w:t>1543a</w:t></w:r></w:p>",
        );
        assert_eq!(
            paragraphs_from_document_xml(&xml).unwrap(),
            vec!["Catalogue", "Paris 1543a"]
        );
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = document("<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>");
        assert_eq!(paragraphs_from_document_xml(&xml).unwrap(), vec!["a\tb\nc"]);
    }

    #[test]
    fn test_table_paragraphs_are_skipped() {
        let xml = document(
            "<w:p><w:r><w:t>before</w:t></w:r></w:p>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
             <w:p><w:r><w:t>after</w:t></w:r></w:p>",
        );
        assert_eq!(
            paragraphs_from_document_xml(&xml).unwrap(),
            vec!["before", "after"]
        );
    }

    #[test]
    fn test_missing_body() {
        let xml = format!(r#"<w:document xmlns:w="{WORD_NS}"/>"#);
        assert!(matches!(
            paragraphs_from_document_xml(&xml),
            Err(CatalogueError::MissingElement { .. })
        ));
    }

    #[test]
    fn test_invalid_xml() {
        assert!(matches!(
            paragraphs_from_document_xml("<w:document>"),
            Err(CatalogueError::XmlParse(_))
        ));
    }

    #[test]
    fn test_read_docx_archive() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let mut writer = ZipWriter::new(file.reopen().unwrap());
        writer
            .start_file(DOCUMENT_ENTRY, SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(document("<w:p><w:r><w:t>Catalogue</w:t></w:r></w:p><w:p/>").as_bytes())
            .unwrap();
        writer.finish().unwrap();

        let paragraphs = DocxSource::new(file.path()).paragraphs().unwrap();
        assert_eq!(paragraphs, paragraphs_from(["Catalogue", ""]));
    }

    #[test]
    fn test_not_a_zip_archive() {
        let mut file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        file.write_all(b"plain text").unwrap();
        assert!(matches!(
            DocxSource::new(file.path()).paragraphs(),
            Err(CatalogueError::Zip(_))
        ));
    }
}
