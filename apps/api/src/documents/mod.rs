//! Document extraction: turns an uploaded résumé (PDF or DOCX) into plain text.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file type '{0}'. Please upload a .pdf or .docx")]
    UnsupportedFormat(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),
}

/// Where the résumé text came from. Reported back in the country breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSource {
    Text,
    File,
    None,
}

impl ResumeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ResumeSource::Text => "text",
            ResumeSource::File => "file",
            ResumeSource::None => "none",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResumeInput {
    pub text: String,
    pub source: ResumeSource,
}

/// Pasted text wins over an uploaded file. Neither → empty text, source `None`.
pub fn resolve_resume(
    resume_text: Option<&str>,
    filename: Option<&str>,
    file_bytes: Option<&[u8]>,
) -> Result<ResumeInput, DocumentError> {
    if let Some(text) = resume_text.filter(|t| !t.trim().is_empty()) {
        return Ok(ResumeInput {
            text: clean_text(text),
            source: ResumeSource::Text,
        });
    }

    match (filename, file_bytes) {
        (Some(name), Some(bytes)) if !bytes.is_empty() => Ok(ResumeInput {
            text: extract_document(bytes, name)?,
            source: ResumeSource::File,
        }),
        _ => Ok(ResumeInput {
            text: String::new(),
            source: ResumeSource::None,
        }),
    }
}

/// Extracts cleaned text from PDF or DOCX bytes, chosen by file extension.
pub fn extract_document(bytes: &[u8], filename: &str) -> Result<String, DocumentError> {
    if bytes.is_empty() || filename.trim().is_empty() {
        return Ok(String::new());
    }

    let lower = filename.to_lowercase();
    let raw = if lower.ends_with(".pdf") {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string()))?
    } else if lower.ends_with(".docx") {
        docx_text(bytes)?
    } else {
        return Err(DocumentError::UnsupportedFormat(filename.to_string()));
    };

    Ok(clean_text(&raw))
}

/// NUL → space, lines trimmed, blank lines dropped.
pub fn clean_text(text: &str) -> String {
    text.replace('\0', " ")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// A text run, a run-level tab, or a line break. Tab stops inside `<w:tabs>`
/// carry attributes and are not matched.
static DOCX_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>(?P<text>[^<]*)</w:t>|(?P<tab><w:tab\s*/>)|(?P<br><w:br(?:\s[^>]*)?/>)")
        .expect("valid run pattern")
});

static NUMERIC_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(?:x(?P<hex>[0-9A-Fa-f]+)|(?P<dec>[0-9]+));").expect("valid entity pattern")
});

/// Reads `word/document.xml` and joins its text runs, one line per paragraph.
fn docx_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| DocumentError::Docx(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| DocumentError::Docx(e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| DocumentError::Docx(e.to_string()))?;

    Ok(docx_xml_text(&xml))
}

fn docx_xml_text(xml: &str) -> String {
    xml.split("</w:p>")
        .map(|paragraph| {
            DOCX_RUN
                .captures_iter(paragraph)
                .map(|c| {
                    if let Some(text) = c.name("text") {
                        decode_entities(text.as_str())
                    } else if c.name("tab").is_some() {
                        "\t".to_string()
                    } else {
                        "\n".to_string()
                    }
                })
                .collect::<String>()
        })
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Numeric references first, `&amp;` last, so `&amp;#38;` stays literal.
fn decode_entities(text: &str) -> String {
    let numeric = NUMERIC_ENTITY.replace_all(text, |c: &regex::Captures| {
        let code = match (c.name("hex"), c.name("dec")) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            _ => None,
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| c[0].to_string())
    });

    numeric
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
