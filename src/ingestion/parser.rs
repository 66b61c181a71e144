//! PDF text extraction with per-page provenance

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Text content of a single page
#[derive(Debug, Clone)]
pub struct PageText {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Cleaned text content of the page
    pub text: String,
}

/// A parsed PDF with page-level text
#[derive(Debug, Clone)]
pub struct ParsedPdf {
    /// Ordered pages, 1-indexed. Pages with no extractable text keep an
    /// empty string so page numbers stay aligned with the source document.
    pub pages: Vec<PageText>,
    /// SHA-256 hash of the extracted text
    pub content_hash: String,
    /// Total pages in the document
    pub total_pages: u32,
}

/// PDF parser: pure function over bytes
pub struct PdfParser;

impl PdfParser {
    /// Parse PDF bytes into per-page text.
    ///
    /// Fails with a parse error when the bytes are not a valid PDF or when
    /// no page yields any extractable text.
    pub fn parse(filename: &str, data: &[u8]) -> Result<ParsedPdf> {
        if data.is_empty() {
            return Err(Error::parse(filename, "file is empty"));
        }

        // Validate document structure up front so garbage bytes fail with a
        // clear parse error instead of an extraction panic further down.
        let document = lopdf::Document::load_mem(data)
            .map_err(|e| Error::parse(filename, format!("not a valid PDF: {}", e)))?;
        let total_pages = document.get_pages().len() as u32;

        let raw_pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| Error::parse(filename, format!("text extraction failed: {}", e)))?;

        let pages: Vec<PageText> = raw_pages
            .iter()
            .enumerate()
            .map(|(i, raw)| PageText {
                page_number: i as u32 + 1,
                text: clean_text(raw),
            })
            .collect();

        if pages.iter().all(|p| p.text.is_empty()) {
            return Err(Error::parse(
                filename,
                "no extractable text; the PDF may be image-based or encrypted",
            ));
        }

        let mut hasher = Sha256::new();
        for page in &pages {
            hasher.update(page.text.as_bytes());
        }
        let content_hash = hex::encode(hasher.finalize());

        tracing::debug!(
            filename = %filename,
            pages = pages.len(),
            "parsed PDF"
        );

        Ok(ParsedPdf {
            pages,
            content_hash,
            total_pages,
        })
    }
}

/// Normalize extracted page text: drop null bytes and blank lines, fold
/// typographic punctuation and ligatures that PDF fonts commonly emit.
fn clean_text(raw: &str) -> String {
    let normalized: String = raw
        .chars()
        .filter(|c| *c != '\0')
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2010}' | '\u{2011}' | '\u{2013}' | '\u{2014}' => '-',
            '\u{00A0}' => ' ',
            other => other,
        })
        .collect();

    let normalized = normalized
        .replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace('\u{2026}', "...");

    normalized
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bytes_fail_with_parse_error() {
        let err = PdfParser::parse("empty.pdf", &[]).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("empty.pdf"));
    }

    #[test]
    fn garbage_bytes_fail_with_parse_error() {
        let err = PdfParser::parse("junk.pdf", b"this is not a pdf").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn clean_text_normalizes_glyphs_and_blank_lines() {
        let raw = "  \u{201C}e\u{FB03}cient\u{201D}  \n\n\u{2014} dash\0\n   ";
        assert_eq!(clean_text(raw), "\"efficient\"\n- dash");
    }
}
