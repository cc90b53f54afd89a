//! Extraction metrics.
//!
//! Recorded through the `metrics` facade. The library installs no recorder;
//! whoever embeds it decides where the numbers go.

use crate::types::SourceFormat;

pub const CHUNKS_SEGMENTED: &str = "patent_grants_chunks_segmented_total";
pub const DOCUMENTS_EXTRACTED: &str = "patent_grants_documents_extracted_total";
pub const DOCUMENTS_REJECTED: &str = "patent_grants_documents_rejected_total";
pub const FIELD_MISSES: &str = "patent_grants_field_misses_total";
pub const CLAIMS_FAILURES: &str = "patent_grants_claims_failures_total";
pub const WHOLE_FILE_FALLBACKS: &str = "patent_grants_whole_file_fallbacks_total";
pub const DOCUMENT_DURATION: &str = "patent_grants_document_duration_seconds";
pub const FILE_DURATION: &str = "patent_grants_file_duration_seconds";

/// Metrics collection for the segment and extract passes
pub struct ExtractionMetrics;

impl ExtractionMetrics {
    /// Attach descriptions to every metric. Call once after installing a recorder.
    pub fn describe() {
        ::metrics::describe_counter!(CHUNKS_SEGMENTED, "Document chunks found in bulk files");
        ::metrics::describe_counter!(DOCUMENTS_EXTRACTED, "Chunks turned into canonical records");
        ::metrics::describe_counter!(DOCUMENTS_REJECTED, "Chunks whose structure could not be parsed");
        ::metrics::describe_counter!(FIELD_MISSES, "Fields left null, by field name");
        ::metrics::describe_counter!(CLAIMS_FAILURES, "Claim scans that nulled the claims field");
        ::metrics::describe_counter!(WHOLE_FILE_FALLBACKS, "Bulk files replaced by a single all-null record");
        ::metrics::describe_histogram!(DOCUMENT_DURATION, "Time to extract one document");
        ::metrics::describe_histogram!(FILE_DURATION, "Time to segment and extract one bulk file");
    }

    pub fn record_chunks_segmented(format: SourceFormat, count: usize) {
        ::metrics::counter!(CHUNKS_SEGMENTED, "format" => format.as_str()).increment(count as u64);
    }

    pub fn record_document_extracted(format: SourceFormat, duration_secs: f64) {
        ::metrics::counter!(DOCUMENTS_EXTRACTED, "format" => format.as_str()).increment(1);
        ::metrics::histogram!(DOCUMENT_DURATION, "format" => format.as_str()).record(duration_secs);
    }

    pub fn record_document_rejected(format: SourceFormat) {
        ::metrics::counter!(DOCUMENTS_REJECTED, "format" => format.as_str()).increment(1);
    }

    pub fn record_field_miss(format: SourceFormat, field: &'static str) {
        ::metrics::counter!(FIELD_MISSES, "format" => format.as_str(), "field" => field).increment(1);
    }

    pub fn record_claims_failure(format: SourceFormat) {
        ::metrics::counter!(CLAIMS_FAILURES, "format" => format.as_str()).increment(1);
    }

    pub fn record_whole_file_fallback(format: SourceFormat) {
        ::metrics::counter!(WHOLE_FILE_FALLBACKS, "format" => format.as_str()).increment(1);
    }

    pub fn record_file_processed(format: SourceFormat, duration_secs: f64) {
        ::metrics::histogram!(FILE_DURATION, "format" => format.as_str()).record(duration_secs);
    }
}
