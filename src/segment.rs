//! Splits one bulk member file into per-document chunks.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::constants::{APS_RECORD_HEADER, GRANT_XML_ROOT, PATDOC_XML_ROOT};
use crate::types::SourceFormat;

static GRANT_XML_DOCUMENT: Lazy<Regex> = Lazy::new(|| document_pattern(GRANT_XML_ROOT));

static PATDOC_XML_DOCUMENT: Lazy<Regex> = Lazy::new(|| document_pattern(PATDOC_XML_ROOT));

static RECORD_HEADER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?m)^{}\r?\n", APS_RECORD_HEADER)).expect("APS header pattern is valid")
});

/// Shortest case-insensitive span from `<root ...>` to `</root>`.
fn document_pattern(root: &str) -> Regex {
    Regex::new(&format!(r"(?is)<{root}(?:\s[^>]*)?>.*?</{root}\s*>"))
        .expect("document pattern is valid")
}

/// Split raw bulk text into document chunks, in file order.
///
/// Finding nothing is not an error; the result is simply empty.
pub fn segment(raw: &str, format: SourceFormat) -> Vec<&str> {
    let chunks: Vec<&str> = match format {
        SourceFormat::VariantA => GRANT_XML_DOCUMENT
            .find_iter(raw)
            .map(|m| m.as_str())
            .collect(),
        SourceFormat::VariantB => PATDOC_XML_DOCUMENT
            .find_iter(raw)
            .map(|m| m.as_str())
            .collect(),
        // Everything before the first header is file preamble
        SourceFormat::LineTagged => RECORD_HEADER_LINE.split(raw).skip(1).collect(),
    };
    debug!(
        "segment: format={} bytes_len={} chunks={}",
        format,
        raw.len(),
        chunks.len()
    );
    chunks
}
