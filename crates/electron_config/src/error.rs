//! Errors raised while loading `electron.toml`.

/// Errors that can occur when loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed or has the wrong shape.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A value parsed but is not acceptable.
    #[error("validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_validation() {
        let err = ConfigError::ValidationError("bad part key".into());
        assert_eq!(err.to_string(), "validation error: bad part key");
    }

    #[test]
    fn display_parse() {
        let err = ConfigError::ParseError("unknown variant `flatten`".into());
        assert!(err.to_string().starts_with("failed to parse configuration:"));
    }

    #[test]
    fn io_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ConfigError = io.into();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
