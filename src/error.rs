use crate::spell_check::{DictionaryError, ServiceUnavailable};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    #[error("Service unavailable: {0}")]
    Service(#[from] ServiceUnavailable),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            AppError::Config("missing key".to_string()).to_string(),
            "Configuration error: missing key"
        );
    }

    #[test]
    fn test_io_source_is_kept() {
        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_service_error_conversion() {
        let err = AppError::from(ServiceUnavailable::Status(404));
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn test_dictionary_error_conversion() {
        let err = AppError::from(DictionaryError::EmptyKey);
        assert!(err.to_string().starts_with("Dictionary error:"));
    }
}
