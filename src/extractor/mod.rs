//! Text Extractor - format dispatch and plain-text extraction
//!
//! ## Responsibilities
//!
//! - Map a declared document type to a supported format
//! - Delegate per-format parsing (PDF, DOCX, HTML, Markdown, plain text)
//! - Normalize parser failures into `ExtractionFailed`
//!
//! Pure transform; nothing here touches the store or the network.

use crate::error::{Error, Result};
use pulldown_cmark::{Event as MdEvent, Parser as MdParser, TagEnd};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader as XmlReader;
use scraper::{Html, Selector};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
    Html,
    Markdown,
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Docx => write!(f, "docx"),
            Self::Txt => write!(f, "txt"),
            Self::Html => write!(f, "html"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" | "text" => Ok(Self::Txt),
            "html" | "htm" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(Error::UnsupportedFormat(format!(
                "unsupported document type: {}",
                other
            ))),
        }
    }
}

/// Extract plain text from document bytes in the declared format.
pub fn extract(bytes: &[u8], format: DocumentFormat) -> Result<String> {
    match format {
        DocumentFormat::Pdf => extract_pdf(bytes),
        DocumentFormat::Docx => extract_docx(bytes),
        DocumentFormat::Txt => decode_utf8(bytes),
        DocumentFormat::Html => Ok(html_to_text(&decode_utf8(bytes)?)),
        DocumentFormat::Markdown => Ok(markdown_to_text(&decode_utf8(bytes)?)),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| Error::ExtractionFailed(format!("document is not valid UTF-8: {}", e)))
}

fn extract_pdf(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map(|text| text.trim().to_string())
        .map_err(|e| Error::ExtractionFailed(format!("failed to extract PDF text: {}", e)))
}

/// DOCX is a zip archive; the document body lives in `word/document.xml`.
/// Collect `w:t` text runs, turning paragraphs, tabs, and breaks into
/// whitespace.
fn extract_docx(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::ExtractionFailed(format!("failed to open DOCX archive: {}", e)))?;

    let mut document = archive
        .by_name("word/document.xml")
        .map_err(|e| Error::ExtractionFailed(format!("missing word/document.xml: {}", e)))?;

    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .map_err(|e| Error::ExtractionFailed(format!("failed to read DOCX XML: {}", e)))?;

    let mut reader = XmlReader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut output = String::new();
    let mut in_text_node = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(XmlEvent::Start(ref e)) => match e.name().as_ref() {
                b"w:p" => {
                    if !output.is_empty() {
                        output.push_str("\n\n");
                    }
                }
                b"w:tab" => output.push('\t'),
                b"w:br" => output.push('\n'),
                b"w:t" => in_text_node = true,
                _ => {}
            },
            Ok(XmlEvent::Empty(ref e)) => match e.name().as_ref() {
                b"w:p" => {
                    if !output.is_empty() {
                        output.push_str("\n\n");
                    }
                }
                b"w:tab" => output.push('\t'),
                b"w:br" => output.push('\n'),
                _ => {}
            },
            Ok(XmlEvent::Text(e)) => {
                if in_text_node {
                    let value = e
                        .unescape()
                        .map_err(|err| {
                            Error::ExtractionFailed(format!("failed to parse DOCX XML: {}", err))
                        })?
                        .into_owned();
                    output.push_str(&value);
                }
            }
            Ok(XmlEvent::End(ref e)) => {
                if e.name().as_ref() == b"w:t" {
                    in_text_node = false;
                }
            }
            Ok(XmlEvent::Eof) => break,
            Err(err) => {
                return Err(Error::ExtractionFailed(format!(
                    "failed to parse DOCX XML: {}",
                    err
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(output.trim().to_string())
}

/// Strip HTML markup down to readable text.
///
/// Prefers content elements (paragraphs, headings, list items); falls back
/// to the whole document text when a page carries none.
fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let content_selector =
        Selector::parse("p, h1, h2, h3, h4, h5, h6, li").expect("static selector");

    let mut paragraphs: Vec<String> = Vec::new();
    for element in document.select(&content_selector) {
        let text: String = element.text().collect::<Vec<_>>().join(" ");
        let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !cleaned.is_empty() {
            paragraphs.push(cleaned);
        }
    }

    if !paragraphs.is_empty() {
        return paragraphs.join("\n\n");
    }

    // No content elements; take everything outside script/style.
    let body_selector = Selector::parse("body").expect("static selector");
    let scope = document.select(&body_selector).next();
    let text: String = match scope {
        Some(body) => body.text().collect::<Vec<_>>().join(" "),
        None => document.root_element().text().collect::<Vec<_>>().join(" "),
    };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip Markdown markup, keeping the text and code content.
fn markdown_to_text(markdown: &str) -> String {
    let mut output = String::new();

    for event in MdParser::new(markdown) {
        match event {
            MdEvent::Text(text) => output.push_str(&text),
            MdEvent::Code(code) => output.push_str(&code),
            MdEvent::SoftBreak | MdEvent::HardBreak => output.push('\n'),
            MdEvent::End(TagEnd::Paragraph)
            | MdEvent::End(TagEnd::Heading(_))
            | MdEvent::End(TagEnd::Item)
            | MdEvent::End(TagEnd::CodeBlock)
            | MdEvent::End(TagEnd::BlockQuote(_)) => {
                if !output.ends_with("\n\n") {
                    output.push_str("\n\n");
                }
            }
            _ => {}
        }
    }

    output.trim().to_string()
}
