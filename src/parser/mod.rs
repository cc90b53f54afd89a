pub mod aps_text;
pub mod claims;
pub mod grant_xml;
pub mod patdoc_xml;
pub mod xml_path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::metrics::ExtractionMetrics;
use crate::normalize::collapse_whitespace;
use crate::types::{Claim, PatentRecord, SourceFormat};

pub use aps_text::ApsTextExtractor;
pub use grant_xml::GrantXmlExtractor;
pub use patdoc_xml::PatdocXmlExtractor;

/// Turns one document chunk into a canonical record.
///
/// Field-level problems never surface here: they become `None` on the record.
/// An `Err` means the chunk's structure cannot be trusted, and the caller
/// abandons the whole bulk file.
pub trait Extractor: Send + Sync {
    fn format(&self) -> SourceFormat;
    fn extract(&self, chunk: &str) -> Result<PatentRecord>;
}

/// A wrapper that adds metrics to any extractor implementation
pub struct MetricsExtractor<E: Extractor> {
    inner: E,
}

impl<E: Extractor> MetricsExtractor<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: Extractor> Extractor for MetricsExtractor<E> {
    fn format(&self) -> SourceFormat {
        self.inner.format()
    }

    fn extract(&self, chunk: &str) -> Result<PatentRecord> {
        let start_time = std::time::Instant::now();
        let format = self.inner.format();

        match self.inner.extract(chunk) {
            Ok(record) => {
                ExtractionMetrics::record_document_extracted(
                    format,
                    start_time.elapsed().as_secs_f64(),
                );
                Ok(record)
            }
            Err(e) => {
                ExtractionMetrics::record_document_rejected(format);
                Err(e)
            }
        }
    }
}

/// The extractor for a given source encoding.
pub fn extractor_for(format: SourceFormat) -> Box<dyn Extractor> {
    match format {
        SourceFormat::VariantA => Box::new(MetricsExtractor::new(GrantXmlExtractor::new())),
        SourceFormat::VariantB => Box::new(MetricsExtractor::new(PatdocXmlExtractor::new())),
        SourceFormat::LineTagged => Box::new(MetricsExtractor::new(ApsTextExtractor::new())),
    }
}

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"));

/// Remove every tag and normalize whitespace.
pub(crate) fn strip_markup(fragment: &str) -> String {
    collapse_whitespace(&MARKUP.replace_all(fragment, ""))
}

/// Log and count a missing field; the value passes through unchanged.
pub(crate) fn field_or_null<T>(format: SourceFormat, field: &'static str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        debug!("{}: field {} unavailable", format, field);
        ExtractionMetrics::record_field_miss(format, field);
    }
    value
}

/// A failed claims scan nulls the claims field as a unit.
pub(crate) fn claims_or_null(format: SourceFormat, claims: Result<Vec<Claim>>) -> Option<Vec<Claim>> {
    match claims {
        Ok(claims) => Some(claims),
        Err(e) => {
            warn!("{}: claims unavailable: {}", format, e);
            ExtractionMetrics::record_claims_failure(format);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(
            strip_markup("<claim-text>1. A method <i>of</i>\n   treating</claim-text>"),
            "1. A method of treating"
        );
    }

    #[test]
    fn test_extractor_for_matches_format() {
        for format in [
            SourceFormat::VariantA,
            SourceFormat::VariantB,
            SourceFormat::LineTagged,
        ] {
            assert_eq!(extractor_for(format).format(), format);
        }
    }
}
