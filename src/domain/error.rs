// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure in the configuration layer maps to one of the
// variants below, and every message names the offending entity
// (a path, a source name, a slide id, or a parameter field) so
// the user knows exactly what to fix.
//
// Propagation policy: errors are surfaced to the caller — no
// silent recovery, no retries. All operations here are local,
// synchronous file/config work, so there is nothing to retry.

use thiserror::Error;

/// Convenience alias used throughout the domain, data and infra layers.
pub type Result<T> = std::result::Result<T, SlidekitError>;

/// All errors raised by the configuration layer.
#[derive(Debug, Error)]
pub enum SlidekitError {
    /// Bad or unwritable project root, or otherwise unusable settings
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Missing project, dataset source, or annotation reference
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A dataset source name collides with an existing registration
    #[error("Duplicate name: {message}")]
    DuplicateName { message: String },

    /// Malformed annotation or settings file
    #[error("Format error: {message}")]
    Format { message: String },

    /// Bad ModelParameterSet field or an unresolvable slide reference
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Underlying filesystem failure during persistence
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SlidekitError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn duplicate_name(message: impl Into<String>) -> Self {
        Self::DuplicateName {
            message: message.into(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity() {
        let error = SlidekitError::not_found("dataset source 'TCGA' is not registered");
        assert_eq!(
            error.to_string(),
            "Not found: dataset source 'TCGA' is not registered"
        );
    }

    #[test]
    fn test_validation_message_names_field() {
        let error = SlidekitError::validation("tile_px must be positive (got 0)");
        assert_eq!(
            error.to_string(),
            "Validation error: tile_px must be positive (got 0)"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: SlidekitError = io.into();
        assert!(matches!(error, SlidekitError::Io(_)));
    }
}
