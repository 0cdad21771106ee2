/// Errors raised while building or loading a correction dictionary
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Correction entry has an empty incorrect form")]
    EmptyKey,

    #[error("Duplicate incorrect form in correction dictionary: {key}")]
    DuplicateKey { key: String },

    #[error("Corrected form for '{key}' is not a string")]
    InvalidValue { key: String },

    #[error("Dictionary file {path} has no [corrections] table")]
    MissingTable { path: String },

    #[error("Failed to parse dictionary file {path}: {details}")]
    ParseFailed { path: String, details: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

/// The classification service could not produce a usable answer
#[derive(Debug, thiserror::Error)]
pub enum ServiceUnavailable {
    #[error("Request to classification service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Classification service returned HTTP {0}")]
    Status(u16),

    #[error("Malformed classification payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid classification endpoint {endpoint}: {details}")]
    InvalidEndpoint { endpoint: String, details: String },
}
