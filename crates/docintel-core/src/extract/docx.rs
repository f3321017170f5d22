//! DOCX text extraction (paragraph text from `word/document.xml`)

use lazy_static::lazy_static;
use regex::Regex;
use std::io::{Cursor, Read};

lazy_static! {
    static ref PARAGRAPH_END_RE: Regex = Regex::new(r"</w:p>").unwrap();
    static ref BREAK_RE: Regex = Regex::new(r"<w:(?:br|cr)\s*/>").unwrap();
    static ref TAB_RE: Regex = Regex::new(r"<w:tab\s*/>").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").unwrap();
}

const DOCUMENT_XML: &str = "word/document.xml";

pub(super) fn extract_text(bytes: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| format!("{}: {}", DOCUMENT_XML, e))?
        .read_to_string(&mut xml)
        .map_err(|e| e.to_string())?;

    Ok(xml_to_text(&xml))
}

fn xml_to_text(xml: &str) -> String {
    let text = PARAGRAPH_END_RE.replace_all(xml, "\n");
    let text = BREAK_RE.replace_all(&text, "\n");
    let text = TAB_RE.replace_all(&text, "\t");
    let text = TAG_RE.replace_all(&text, "");
    unescape_xml(&text)
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use std::io::Write;

    /// Minimal DOCX archive with one `<w:p>` per paragraph
    pub(in crate::extract) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        );

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file(DOCUMENT_XML, options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let docx = build_docx(&["First paragraph.", "Second &amp; last."]);
        let text = extract_text(&docx).unwrap();
        assert_eq!(text.trim(), "First paragraph.\nSecond & last.");
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>"#;
        assert_eq!(xml_to_text(xml), "a\tb\nc\n");
    }

    #[test]
    fn test_missing_document_xml() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hello").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_text(&bytes).unwrap_err();
        assert!(err.contains(DOCUMENT_XML));
    }
}
