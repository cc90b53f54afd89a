use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Document still unparsable after entity stripping: {0}")]
    MalformedDocument(roxmltree::Error),

    #[error("Malformed claim block: {0}")]
    MalformedClaim(String),

    #[error("Claims section not found")]
    ClaimsSectionMissing,

    #[error("Unrecognized bulk member name: {0}")]
    UnknownFormat(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
