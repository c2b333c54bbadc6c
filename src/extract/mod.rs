//! Resume text extraction and chunking.
//!
//! Supports PDF (via pdf-extract) and DOCX (word/document.xml pulled out of
//! the zip container). Extracted text is split into overlapping chunks
//! sized for the language-model adapter.

mod chunker;

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

pub use chunker::split_text;

/// Chunk size in characters, matching the model-input budget.
pub const CHUNK_SIZE: usize = 700;
/// Overlap between consecutive chunks in characters.
pub const CHUNK_OVERLAP: usize = 200;

/// Errors that can occur during resume extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file format: {0:?} (expected PDF or DOCX)")]
    UnsupportedFormat(String),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recognized resume formats, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// Extracted resume text plus its derived chunks.
#[derive(Debug, Clone)]
pub struct ResumeText {
    /// File name the resume was read from (cache key downstream).
    pub file_name: String,
    /// Full extracted text.
    pub text: String,
    /// Overlapping chunks derived from `text`; immutable once produced.
    pub chunks: Vec<String>,
}

/// Read a resume file and split it into chunks.
pub fn extract_resume(path: &Path) -> Result<ResumeText, ExtractionError> {
    let format = ResumeFormat::from_path(path).ok_or_else(|| {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        ExtractionError::UnsupportedFormat(ext)
    })?;

    let bytes = std::fs::read(path)?;
    let text = match format {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| ExtractionError::Extraction(e.to_string()))?,
        ResumeFormat::Docx => docx_text(&bytes)?,
    };

    let chunks = split_text(&text, CHUNK_SIZE, CHUNK_OVERLAP);
    debug!(
        "extracted {} chars / {} chunks from {}",
        text.len(),
        chunks.len(),
        path.display()
    );

    Ok(ResumeText {
        file_name: path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string(),
        text,
        chunks,
    })
}

/// Pull paragraph text out of a DOCX container.
///
/// DOCX is a zip with the body in word/document.xml; one line is emitted
/// per `w:p` paragraph element.
fn docx_text(data: &[u8]) -> Result<String, ExtractionError> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| ExtractionError::Extraction(format!("not a DOCX container: {}", e)))?;

    let mut document = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Extraction(format!("missing word/document.xml: {}", e)))?;
    let mut xml = String::new();
    document.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut lines = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:p" => current.clear(),
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => {
                if !current.trim().is_empty() {
                    lines.push(current.trim().to_string());
                }
            }
            Ok(Event::Text(t)) => {
                let piece = t
                    .xml_content()
                    .map_err(|e| ExtractionError::Extraction(e.to_string()))?;
                current.push_str(&piece);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractionError::Extraction(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fake_docx(document_xml: &str) -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("word/document.xml", options).unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn format_detection_by_extension() {
        assert_eq!(
            ResumeFormat::from_path(Path::new("cv.pdf")),
            Some(ResumeFormat::Pdf)
        );
        assert_eq!(
            ResumeFormat::from_path(Path::new("cv.DOCX")),
            Some(ResumeFormat::Docx)
        );
        assert_eq!(ResumeFormat::from_path(Path::new("cv.txt")), None);
        assert_eq!(ResumeFormat::from_path(Path::new("cv")), None);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.odt");
        std::fs::write(&path, b"not a resume").unwrap();

        let err = extract_resume(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ext) if ext == "odt"));
    }

    #[test]
    fn docx_paragraphs_become_lines() {
        let xml = r#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
                <w:p><w:r><w:t>Senior </w:t></w:r><w:r><w:t>Engineer</w:t></w:r></w:p>
                <w:p></w:p>
              </w:body>
            </w:document>"#;
        let text = docx_text(&fake_docx(xml)).unwrap();
        assert_eq!(text, "Jane Doe\nSenior Engineer");
    }

    #[test]
    fn docx_without_document_xml_fails() {
        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("unrelated.txt", options).unwrap();
            writer.write_all(b"nope").unwrap();
            writer.finish().unwrap();
        }
        let err = docx_text(&buf.into_inner()).unwrap_err();
        assert!(matches!(err, ExtractionError::Extraction(_)));
    }
}
