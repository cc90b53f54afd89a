//! `pg` grant documents: SGML-flavoured `<PATDOC>` XML, 2001-2004.
//!
//! These files lean on entities declared in an external DTD that is never
//! shipped alongside them, so every `&name;` reference is dropped before the
//! tree is built. A chunk that still fails to parse is reported as
//! [`ExtractError::MalformedDocument`], which abandons the whole bulk file.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::{Document, Node};
use tracing::{debug, warn};

use super::xml_path::text_at;
use super::{claims_or_null, field_or_null, strip_markup, Extractor};
use crate::error::{ExtractError, Result};
use crate::normalize::strip_leading_zeros;
use crate::types::{Claim, PatentRecord, SourceFormat};

const PATENT_NUMBER_PATH: &[&str] = &["SDOBI", "B100", "B110", "DNUM", "PDAT"];
const PUBLICATION_DATE_PATH: &[&str] = &["SDOBI", "B100", "B140", "DATE", "PDAT"];
const TITLE_PATH: &[&str] = &["SDOBI", "B500", "B540", "STEXT", "PDAT"];

static ENTITY_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&[^\s&;<>]+;").expect("entity pattern is valid"));

static CLAIM_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<CLM(\s[^>]*)?>(.*?)</CLM\s*>").expect("CLM pattern is valid")
});

static CLAIM_ID_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bID\s*=\s*"CLM-(\d+)""#).expect("CLM id pattern is valid")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct PatdocXmlExtractor;

impl PatdocXmlExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for PatdocXmlExtractor {
    fn format(&self) -> SourceFormat {
        SourceFormat::VariantB
    }

    fn extract(&self, chunk: &str) -> Result<PatentRecord> {
        debug!("PatdocXmlExtractor: start chunk_len={}", chunk.len());
        let format = self.format();

        let cleaned = strip_entities(chunk);
        let doc = Document::parse(&cleaned).map_err(|e| {
            warn!("PatdocXmlExtractor: unparsable after entity stripping: {}", e);
            ExtractError::MalformedDocument(e)
        })?;
        let root = doc.root_element();

        Ok(PatentRecord {
            patent_number: field_or_null(format, "patent_number", patent_number(root)),
            expiration_date: None,
            published_date: field_or_null(
                format,
                "published_date",
                text_at(root, PUBLICATION_DATE_PATH),
            ),
            application_numbers: None,
            claims: claims_or_null(format, scan_claims(&cleaned)),
            invention_title: field_or_null(format, "invention_title", text_at(root, TITLE_PATH)),
        })
    }
}

/// Drop every `&...;` entity or character reference.
pub(crate) fn strip_entities(chunk: &str) -> Cow<'_, str> {
    ENTITY_REFERENCE.replace_all(chunk, "")
}

fn patent_number(root: Node<'_, '_>) -> Option<String> {
    text_at(root, PATENT_NUMBER_PATH).map(|n| strip_leading_zeros(&n))
}

/// Every `<CLM>` block in the entity-stripped chunk, numbered from its `ID="CLM-nnnnn"`
/// attribute. One block without that identifier fails the whole scan.
pub(crate) fn scan_claims(chunk: &str) -> Result<Vec<Claim>> {
    CLAIM_BLOCK
        .captures_iter(chunk)
        .map(|caps| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let number = CLAIM_ID_ATTR
                .captures(attrs)
                .map(|n| strip_leading_zeros(&n[1]))
                .ok_or_else(|| {
                    ExtractError::MalformedClaim(format!("missing CLM-<digits> id in <CLM{}>", attrs))
                })?;
            Ok(Claim {
                claim_number: number,
                claim_text: strip_markup(&caps[2]),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<PATDOC DTD="2.5" STATUS="Build 20010425">
<SDOBI>
<B100>
<B110><DNUM><PDAT>D0468073</PDAT></DNUM></B110>
<B130><PDAT>S1</PDAT></B130>
<B140><DATE><PDAT>20010606</PDAT></DATE></B140>
</B100>
<B500>
<B540><STEXT><PDAT>Popcorn ice cream</PDAT></STEXT></B540>
</B500>
</SDOBI>
<SDOCL>
<CL>
<CLM ID="CLM-00001">
<PARA ID="P-00001"><PTEXT><PDAT>The ornamental design for popcorn ice cream&mdash;as shown.</PDAT></PTEXT></PARA>
</CLM>
</CL>
</SDOCL>
</PATDOC>"#;

    #[test]
    fn test_extracts_all_fields() {
        let record = PatdocXmlExtractor::new().extract(DOC).unwrap();
        assert_eq!(record.patent_number.as_deref(), Some("D0468073"));
        assert_eq!(record.published_date.as_deref(), Some("20010606"));
        assert_eq!(record.invention_title.as_deref(), Some("Popcorn ice cream"));
        let claims = record.claims.unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].claim_number, "1");
        assert_eq!(
            claims[0].claim_text,
            "The ornamental design for popcorn ice creamas shown."
        );
    }

    #[test]
    fn test_undeclared_entities_are_stripped() {
        assert_eq!(strip_entities("a&mdash;b &#x26; c&amp;"), "ab  c");
        let doc = DOC.replace("Popcorn ice cream</PDAT>", "Popcorn&thinsp; ice cream</PDAT>");
        let record = PatdocXmlExtractor::new().extract(&doc).unwrap();
        assert_eq!(record.invention_title.as_deref(), Some("Popcorn ice cream"));
    }

    #[test]
    fn test_claim_text_has_no_entity_references() {
        let doc = DOC.replace(
            "The ornamental design for popcorn ice cream&mdash;as shown.",
            "ice cream&mdash;as shown &amp; described",
        );
        let claims = PatdocXmlExtractor::new().extract(&doc).unwrap().claims.unwrap();
        assert_eq!(claims[0].claim_text, "ice creamas shown described");
        assert!(!claims[0].claim_text.contains('&'));
    }

    #[test]
    fn test_unparsable_document_is_rejected() {
        let doc = DOC.replace("</B500>", "");
        let err = PatdocXmlExtractor::new().extract(&doc).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedDocument(_)));
    }

    #[test]
    fn test_missing_title_nulls_only_title() {
        let doc = DOC.replace("<B540>", "<B541>").replace("</B540>", "</B541>");
        let record = PatdocXmlExtractor::new().extract(&doc).unwrap();
        assert!(record.invention_title.is_none());
        assert_eq!(record.patent_number.as_deref(), Some("D0468073"));
        assert_eq!(record.claims.map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_claim_without_clm_identifier_nulls_all_claims() {
        let doc = DOC.replace("ID=\"CLM-00001\"", "ID=\"C1\"");
        let record = PatdocXmlExtractor::new().extract(&doc).unwrap();
        assert!(record.claims.is_none());
        assert_eq!(record.published_date.as_deref(), Some("20010606"));
    }

    #[test]
    fn test_claim_numbers_are_zero_stripped() {
        let claims = scan_claims(
            "<CLM ID=\"CLM-00001\">first</CLM><CLM ID=\"CLM-00012\"><PDAT>twelfth</PDAT></CLM>",
        )
        .unwrap();
        assert_eq!(claims[1].claim_number, "12");
        assert_eq!(claims[1].claim_text, "twelfth");
    }
}
