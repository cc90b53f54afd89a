//! Serializes records for downstream consumers.

use std::io::Write;

use crate::error::Result;
use crate::types::PatentRecord;

/// One JSON object per line, or a single pretty-printed array.
pub fn write_records<W: Write>(mut out: W, records: &[PatentRecord], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut out, records)?;
        writeln!(out)?;
    } else {
        for record in records {
            serde_json::to_writer(&mut out, record)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
