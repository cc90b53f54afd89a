/// Bulk member file name prefixes, one per source encoding.
pub const GRANT_XML_PREFIX: &str = "ipg";
pub const PATDOC_XML_PREFIX: &str = "pg0";
pub const APS_TEXT_PREFIX: &str = "pftaps";

// Root elements of the two XML encodings
pub const GRANT_XML_ROOT: &str = "us-patent-grant";
pub const PATDOC_XML_ROOT: &str = "PATDOC";

/// Header token that opens every record in an APS text file.
pub const APS_RECORD_HEADER: &str = "PATN";

// APS field tags
pub const APS_PATENT_NUMBER: &str = "PNO";
pub const APS_ISSUE_DATE: &str = "ISD";
pub const APS_TITLE: &str = "TTL";

// APS claim section tags. Utility grants use CLMS, design grants DCLM.
pub const APS_CLAIMS_SECTION: &str = "CLMS";
pub const APS_DESIGN_CLAIMS_SECTION: &str = "DCLM";
pub const APS_CLAIM_NUMBER: &str = "NUM";
pub const APS_STATEMENT: &str = "STM";

/// Claim number assumed until the first NUM marker is seen.
pub const DEFAULT_CLAIM_NUMBER: &str = "1.";

pub const RAW_DATE_FORMAT: &str = "%Y%m%d";
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
