//! `ipg` grant documents: `<us-patent-grant>` XML, 2005 onwards.

use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::{Document, Node};
use tracing::{debug, warn};

use super::xml_path::text_at;
use super::{claims_or_null, field_or_null, strip_markup, Extractor};
use crate::constants::{ISO_DATE_FORMAT, RAW_DATE_FORMAT};
use crate::error::{ExtractError, Result};
use crate::normalize::{reformat_date, strip_leading_zeros};
use crate::types::{Claim, PatentRecord, SourceFormat};

const PATENT_NUMBER_PATH: &[&str] = &[
    "us-bibliographic-data-grant",
    "publication-reference",
    "document-id",
    "doc-number",
];
const TITLE_PATH: &[&str] = &["us-bibliographic-data-grant", "invention-title"];
const PUBLICATION_DATE_ATTR: &str = "date-publ";

static CLAIM_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<claim(\s[^>]*)?>(.*?)</claim\s*>").expect("claim pattern is valid")
});

static CLAIM_NUM_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bnum\s*=\s*"(\d+)""#).expect("num attribute pattern is valid")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct GrantXmlExtractor;

impl GrantXmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for GrantXmlExtractor {
    fn format(&self) -> SourceFormat {
        SourceFormat::VariantA
    }

    fn extract(&self, chunk: &str) -> Result<PatentRecord> {
        debug!("GrantXmlExtractor: start chunk_len={}", chunk.len());
        let format = self.format();

        // Claims come from the raw text, so they survive a tree parse failure
        let claims = claims_or_null(format, scan_claims(chunk));

        let (patent_number, published_date, invention_title) = match Document::parse(chunk) {
            Ok(doc) => {
                let root = doc.root_element();
                (patent_number(root), published_date(root), invention_title(root))
            }
            Err(e) => {
                warn!("GrantXmlExtractor: tree parse failed, bibliographic fields unavailable: {}", e);
                (None, None, None)
            }
        };

        Ok(PatentRecord {
            patent_number: field_or_null(format, "patent_number", patent_number),
            expiration_date: None,
            published_date: field_or_null(format, "published_date", published_date),
            application_numbers: None,
            claims,
            invention_title: field_or_null(format, "invention_title", invention_title),
        })
    }
}

fn patent_number(root: Node<'_, '_>) -> Option<String> {
    text_at(root, PATENT_NUMBER_PATH).map(|n| strip_leading_zeros(&n))
}

fn published_date(root: Node<'_, '_>) -> Option<String> {
    let raw = root.attribute(PUBLICATION_DATE_ATTR)?;
    match reformat_date(raw, RAW_DATE_FORMAT, ISO_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            debug!("GrantXmlExtractor: unparsable {}='{}': {}", PUBLICATION_DATE_ATTR, raw, e);
            None
        }
    }
}

fn invention_title(root: Node<'_, '_>) -> Option<String> {
    text_at(root, TITLE_PATH)
}

/// Every `<claim>` block in the raw chunk. One block without a numeric `num`
/// attribute fails the whole scan.
pub(crate) fn scan_claims(chunk: &str) -> Result<Vec<Claim>> {
    CLAIM_BLOCK
        .captures_iter(chunk)
        .map(|caps| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let number = CLAIM_NUM_ATTR
                .captures(attrs)
                .map(|n| strip_leading_zeros(&n[1]))
                .ok_or_else(|| {
                    ExtractError::MalformedClaim(format!("missing num attribute in <claim{}>", attrs))
                })?;
            Ok(Claim {
                claim_number: number,
                claim_text: strip_markup(&caps[2]),
            })
        })
        .collect()
}
