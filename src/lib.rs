//! Normalizes bulk USPTO patent-grant files into canonical records.
//!
//! Three source encodings are supported: `ipg` grant XML, `pg` PATDOC XML and
//! `pftaps` APS text. The caller picks the [`SourceFormat`]; the library never
//! sniffs content and never touches the network or filesystem on its own.

pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod segment;
pub mod types;

pub use error::{ExtractError, Result};
pub use pipeline::{process_bulk_file, Pipeline, PipelineResult};
pub use types::{Claim, PatentRecord, SourceFormat};
