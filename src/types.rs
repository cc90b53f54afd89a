use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{APS_TEXT_PREFIX, GRANT_XML_PREFIX, PATDOC_XML_PREFIX};
use crate::error::{ExtractError, Result};

/// One numbered claim, in the order it appeared in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_number: String,
    pub claim_text: String,
}

/// The canonical record every extractor produces.
///
/// All six keys are always serialized; an unavailable field is `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatentRecord {
    pub patent_number: Option<String>,
    /// Reserved for future sources; never populated by the current extractors.
    pub expiration_date: Option<String>,
    pub published_date: Option<String>,
    /// Reserved for future sources; never populated by the current extractors.
    pub application_numbers: Option<Vec<String>>,
    pub claims: Option<Vec<Claim>>,
    pub invention_title: Option<String>,
}

impl PatentRecord {
    /// The all-null record emitted when a whole bulk file has to be abandoned.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Encoding of a bulk member file. Chosen by the caller, never sniffed from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// `ipg*` files: one `<us-patent-grant>` XML document per grant (2005 onwards).
    VariantA,
    /// `pg0*` files: one `<PATDOC>` SGML-flavoured XML document per grant (2001-2004).
    VariantB,
    /// `pftaps*` files: APS fixed-tag text records (1976-2001).
    LineTagged,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::VariantA => "variant-a",
            SourceFormat::VariantB => "variant-b",
            SourceFormat::LineTagged => "line-tagged",
        }
    }

    /// Resolve the format from an archive member's file name convention.
    pub fn from_member_name(name: &str) -> Result<Self> {
        let file_name = Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(name);

        if file_name.starts_with(GRANT_XML_PREFIX) {
            Ok(SourceFormat::VariantA)
        } else if file_name.starts_with(PATDOC_XML_PREFIX) {
            Ok(SourceFormat::VariantB)
        } else if file_name.starts_with(APS_TEXT_PREFIX) {
            Ok(SourceFormat::LineTagged)
        } else {
            Err(ExtractError::UnknownFormat(name.to_string()))
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "variant-a" | "ipg" => Ok(SourceFormat::VariantA),
            "variant-b" | "pg" => Ok(SourceFormat::VariantB),
            "line-tagged" | "aps" => Ok(SourceFormat::LineTagged),
            other => Err(ExtractError::UnknownFormat(other.to_string())),
        }
    }
}
