//! `pftaps` grant records: APS fixed-tag text, 1976-2001.
//!
//! Each line is a three-character uppercase tag, two spaces and a value.

use tracing::debug;

use super::claims::{claims_section, reconstruct_claims};
use super::{claims_or_null, field_or_null, Extractor};
use crate::constants::{APS_ISSUE_DATE, APS_PATENT_NUMBER, APS_TITLE};
use crate::error::Result;
use crate::normalize::strip_leading_zeros;
use crate::types::{Claim, PatentRecord, SourceFormat};

#[derive(Debug, Default, Clone, Copy)]
pub struct ApsTextExtractor;

impl ApsTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for ApsTextExtractor {
    fn format(&self) -> SourceFormat {
        SourceFormat::LineTagged
    }

    fn extract(&self, chunk: &str) -> Result<PatentRecord> {
        debug!("ApsTextExtractor: start chunk_len={}", chunk.len());
        let format = self.format();

        let patent_number =
            first_tagged_value(chunk, APS_PATENT_NUMBER).map(|n| strip_leading_zeros(&n));

        Ok(PatentRecord {
            patent_number: field_or_null(format, "patent_number", patent_number),
            expiration_date: None,
            published_date: field_or_null(
                format,
                "published_date",
                first_tagged_value(chunk, APS_ISSUE_DATE),
            ),
            application_numbers: None,
            claims: claims_or_null(format, extract_claims(chunk)),
            invention_title: field_or_null(
                format,
                "invention_title",
                first_tagged_value(chunk, APS_TITLE),
            ),
        })
    }
}

/// Value of the first line carrying `tag`.
pub(crate) fn first_tagged_value(chunk: &str, tag: &str) -> Option<String> {
    chunk
        .lines()
        .find_map(|line| line.strip_prefix(tag)?.strip_prefix("  "))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn extract_claims(chunk: &str) -> Result<Vec<Claim>> {
    claims_section(chunk).map(reconstruct_claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = "WKU  038003580\r\nSRC  5\r\nAPN  2742843\r\nPNO  0003800358\r\nISD  19940104\r\nTTL  Deburring apparatus\r\nTTL  Second title line\r\nCLMS\r\nSTM  What is claimed is:\r\nNUM  1.\r\nPAR  A deburring apparatus comprising a rotary brush.\r\nNUM  2.\r\nPAR  The apparatus of claim 1, wherein\r\n     the brush is nylon.\r\nNUM  3.\r\nPAR  The apparatus of claim 2.\r\n";

    #[test]
    fn test_extracts_tagged_fields() {
        let record = ApsTextExtractor::new().extract(RECORD).unwrap();
        assert_eq!(record.patent_number.as_deref(), Some("3800358"));
        assert_eq!(record.published_date.as_deref(), Some("19940104"));
        assert_eq!(record.invention_title.as_deref(), Some("Deburring apparatus"));
        assert!(record.expiration_date.is_none());
        assert!(record.application_numbers.is_none());
    }

    #[test]
    fn test_three_markers_yield_two_claims() {
        let claims = ApsTextExtractor::new().extract(RECORD).unwrap().claims.unwrap();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[1].claim_number, "2");
        assert_eq!(
            claims[1].claim_text,
            "The apparatus of claim 1, wherein the brush is nylon."
        );
    }

    #[test]
    fn test_missing_claims_section_nulls_claims_only() {
        let chunk = "PNO  0003800358\nISD  19940104\nTTL  Deburring apparatus\n";
        let record = ApsTextExtractor::new().extract(chunk).unwrap();
        assert!(record.claims.is_none());
        assert_eq!(record.patent_number.as_deref(), Some("3800358"));
    }

    #[test]
    fn test_tag_requires_two_spaces() {
        assert!(first_tagged_value("PNOX 1\nPNO 2\n", "PNO").is_none());
        assert_eq!(first_tagged_value("PNO  12 \n", "PNO").as_deref(), Some("12"));
    }
}
