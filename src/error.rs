use thiserror::Error;

/// Everything that can go wrong on the game side. All of these are
/// recoverable; callers get back to a clean state via reset.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Rejection sampling gave up. Not expected under normal parameters,
    /// but better than looping forever on a broken random source.
    #[error("random sampling gave up after {attempts} attempts while {context}")]
    GenerationExhausted { context: &'static str, attempts: u32 },

    #[error("draw engine is not active")]
    NotActive,

    #[error("no usable system font found for board rendering")]
    FontUnavailable,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to encode board image: {0}")]
    Image(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::InvalidConfiguration("ticket count must be between 1 and 20, got 0".into());
        assert!(err.to_string().contains("ticket count"));

        let err = GameError::GenerationExhausted { context: "picking ticket numbers", attempts: 10_000 };
        assert!(err.to_string().contains("10000 attempts"));
        assert!(err.to_string().contains("picking ticket numbers"));
    }
}
