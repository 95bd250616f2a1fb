//! Crate-level error type.

use crate::config::loader::ConfigError;

/// Errors surfaced while setting up or running the server.
///
/// Routing failures (404/405) are not errors at this level; see
/// [`crate::routing::RoutingError`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    fn load(text: &str) -> Result<(), Error> {
        parse_config(text)?;
        Ok(())
    }

    #[test]
    fn test_config_errors_convert() {
        let err = load("[timeouts]\nrequest_secs = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Validation(_))));
        assert!(err.to_string().starts_with("configuration error: "));
    }

    #[test]
    fn test_io_errors_convert() {
        let err: Error = std::io::Error::from(std::io::ErrorKind::AddrInUse).into();
        assert!(matches!(err, Error::Io(_)));
    }
}
