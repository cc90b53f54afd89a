//! Rebuilds claims from the multi-line APS claims section.
//!
//! State (`current_number`, `accumulator`) lives in locals of one call, so
//! documents can be reconstructed concurrently.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    APS_CLAIMS_SECTION, APS_CLAIM_NUMBER, APS_DESIGN_CLAIMS_SECTION, APS_STATEMENT,
    DEFAULT_CLAIM_NUMBER,
};
use crate::error::{ExtractError, Result};
use crate::normalize::trim_trailing_dot;
use crate::types::Claim;

static CLAIMS_SECTION_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?m)^(?:{}|{})\b",
        APS_CLAIMS_SECTION, APS_DESIGN_CLAIMS_SECTION
    ))
    .expect("section pattern is valid")
});

static CLAIM_NUMBER_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{}\s+(\d+\.)\s*$", APS_CLAIM_NUMBER)).expect("NUM pattern is valid")
});

static STATEMENT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{}\b", APS_STATEMENT)).expect("STM pattern is valid")
});

static CONTINUATION_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:PAR|PAL|PA\d|TBL|EQU)  ").expect("continuation pattern is valid"));

/// Text after the last `CLMS` / `DCLM` header, through the end of the chunk.
pub fn claims_section(chunk: &str) -> Result<&str> {
    CLAIMS_SECTION_START
        .find_iter(chunk)
        .last()
        .map(|m| &chunk[m.end()..])
        .ok_or(ExtractError::ClaimsSectionMissing)
}

/// Merge tagged and continuation lines into complete claims.
///
/// A claim is emitted when the next `NUM` marker arrives, so the final claim of
/// a multi-line section is never emitted. A one-line section (typical of
/// design grants) is emitted immediately.
pub fn reconstruct_claims(section: &str) -> Vec<Claim> {
    let lines: Vec<&str> = section
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let mut current_number = DEFAULT_CLAIM_NUMBER.to_string();
    let mut accumulator = String::new();
    let mut claims = Vec::new();

    for line in &lines {
        if let Some(caps) = CLAIM_NUMBER_MARKER.captures(line) {
            if !accumulator.is_empty() {
                claims.push(flush(&current_number, &accumulator));
            }
            accumulator.clear();
            current_number = caps[1].to_string();
            continue;
        }
        if STATEMENT_MARKER.is_match(line) {
            continue;
        }
        let content = CONTINUATION_TAG.replace(line, "");
        accumulator.push_str(content.trim());
        accumulator.push(' ');
    }

    if lines.len() == 1 && !accumulator.is_empty() {
        claims.push(flush(&current_number, &accumulator));
    }
    claims
}

fn flush(number: &str, accumulator: &str) -> Claim {
    Claim {
        claim_number: trim_trailing_dot(number.trim()).trim().to_string(),
        claim_text: accumulator.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_after_last_header() {
        let chunk = "CLMS\nNUM  1.\nPAR  old\nDCLM\nPAR  design claim\n";
        assert_eq!(claims_section(chunk).unwrap(), "\nPAR  design claim\n");
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(matches!(
            claims_section("PNO  1\nTTL  x\n"),
            Err(ExtractError::ClaimsSectionMissing)
        ));
    }

    #[test]
    fn test_claims_are_flushed_by_following_marker() {
        let section = "\nSTM  What is claimed is:\nNUM  1.\nPAR  A widget comprising\n     a frame.\nNUM  2.\nPAR  The widget of claim 1.\nNUM  3.\nPAR  The widget of claim 2.\n";
        let claims = reconstruct_claims(section);
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].claim_number, "1");
        assert_eq!(claims[0].claim_text, "A widget comprising a frame.");
        assert_eq!(claims[1].claim_number, "2");
        assert_eq!(claims[1].claim_text, "The widget of claim 1.");
    }

    #[test]
    fn test_trailing_claim_without_following_marker_is_dropped() {
        let section = "NUM  1.\nPAR  Only claim, spread\n     over two lines.\n";
        assert!(reconstruct_claims(section).is_empty());
    }

    #[test]
    fn test_single_line_section_is_flushed_with_default_number() {
        let claims = reconstruct_claims("\nPAR  The ornamental design for a lamp, as shown.\n");
        assert_eq!(
            claims,
            vec![Claim {
                claim_number: "1".to_string(),
                claim_text: "The ornamental design for a lamp, as shown.".to_string(),
            }]
        );
    }

    #[test]
    fn test_claim_numbers_keep_leading_zeros() {
        let claims = reconstruct_claims("NUM  01.\nPAR  first\nNUM  02.\n");
        assert_eq!(claims[0].claim_number, "01");
    }

    #[test]
    fn test_content_before_first_marker_uses_default_number() {
        let claims = reconstruct_claims("PAR  preamble text\nPA1  more\nNUM  2.\n");
        assert_eq!(claims[0].claim_number, "1");
        assert_eq!(claims[0].claim_text, "preamble text more");
    }

    #[test]
    fn test_crlf_lines() {
        let claims = reconstruct_claims("\r\nNUM  1.\r\nPAR  a\r\nNUM  2.\r\n");
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].claim_text, "a");
    }
}
