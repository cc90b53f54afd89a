//! Drives segmentation and extraction over one bulk member file.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::metrics::ExtractionMetrics;
use crate::parser::{extractor_for, Extractor};
use crate::segment::segment;
use crate::types::{PatentRecord, SourceFormat};

/// Result of one pass over a bulk file
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub format: SourceFormat,
    /// Document chunks found by the segmenter.
    pub total_chunks: usize,
    /// One record per chunk, in chunk order, or the single all-null record
    /// when the file was abandoned.
    pub records: Vec<PatentRecord>,
    pub abandoned: bool,
}

pub struct Pipeline;

impl Pipeline {
    /// Segment `raw` and extract every chunk in order.
    #[instrument(skip(raw), fields(bytes_len = raw.len()))]
    pub fn run(raw: &str, format: SourceFormat) -> PipelineResult {
        let start_time = Instant::now();
        let chunks = segment(raw, format);
        ExtractionMetrics::record_chunks_segmented(format, chunks.len());

        let result = Self::extract_all(extractor_for(format).as_ref(), &chunks);
        ExtractionMetrics::record_file_processed(format, start_time.elapsed().as_secs_f64());

        let (records, abandoned) = match result {
            Some(records) => (records, false),
            None => {
                ExtractionMetrics::record_whole_file_fallback(format);
                (vec![PatentRecord::empty()], true)
            }
        };

        info!(
            "Pipeline finished: format={} chunks={} records={} abandoned={}",
            format,
            chunks.len(),
            records.len(),
            abandoned
        );
        PipelineResult {
            format,
            total_chunks: chunks.len(),
            records,
            abandoned,
        }
    }

    /// `None` as soon as one chunk is rejected; the remaining chunks are not visited.
    fn extract_all(extractor: &dyn Extractor, chunks: &[&str]) -> Option<Vec<PatentRecord>> {
        let mut records = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            match extractor.extract(chunk) {
                Ok(record) => {
                    debug!(
                        "chunk {} -> patent_number={:?}",
                        index,
                        record.patent_number.as_deref()
                    );
                    records.push(record);
                }
                Err(e) => {
                    warn!(
                        "chunk {} of {} rejected, abandoning {} file: {}",
                        index,
                        chunks.len(),
                        extractor.format(),
                        e
                    );
                    return None;
                }
            }
        }
        Some(records)
    }
}

/// Normalize one bulk member file into canonical records, in document order.
pub fn process_bulk_file(raw: &str, format: SourceFormat) -> Vec<PatentRecord> {
    Pipeline::run(raw, format).records
}
