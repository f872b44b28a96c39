//! Unified error types for rfp-tools.
//!
//! Errors exist only at the crate boundary (catalog loading, report
//! serialization, configuration). The scoring, matching, and pricing math is
//! total: missing signal resolves to fallback values, empty input to empty
//! results.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rfp-tools operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RfpError {
    /// Errors loading or validating reference catalogs
    #[error("Failed to load catalog: {context}")]
    Catalog {
        context: String,
        #[source]
        source: CatalogErrorKind,
    },

    /// Errors during report payload generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific catalog error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Duplicate {entity} identifier: {id}")]
    DuplicateId { entity: String, id: String },

    #[error("Catalog is empty")]
    Empty,

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("No opportunity was selected")]
    NothingSelected,
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for rfp-tools operations
pub type Result<T> = std::result::Result<T, RfpError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl RfpError {
    /// Create a catalog error with context
    pub fn catalog(context: impl Into<String>, source: CatalogErrorKind) -> Self {
        Self::Catalog {
            context: context.into(),
            source,
        }
    }

    /// Create a catalog error for a duplicate identifier
    pub fn duplicate_id(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::catalog(
            "duplicate identifier",
            CatalogErrorKind::DuplicateId {
                entity: entity.into(),
                id: id.into(),
            },
        )
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for RfpError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for RfpError {
    fn from(err: serde_json::Error) -> Self {
        Self::catalog(
            "JSON deserialization",
            CatalogErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension traits
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context,
/// creating a chain that shows the path through the code.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<RfpError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: RfpError, new_ctx: &str) -> RfpError {
    match err {
        RfpError::Catalog {
            context: existing,
            source,
        } => RfpError::Catalog {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RfpError::Report {
            context: existing,
            source,
        } => RfpError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RfpError::Io {
            path,
            message,
            source,
        } => RfpError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        RfpError::Config(msg) => RfpError::Config(chain_context(new_ctx, &msg)),
        RfpError::Validation(msg) => RfpError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| RfpError::Validation(context.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RfpError::duplicate_id("product", "CAB-001");
        let display = err.to_string();
        assert!(
            display.contains("catalog") || display.contains("duplicate"),
            "Error message should mention the catalog: {}",
            display
        );
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RfpError::io("/path/to/catalog.json", io_err);

        assert!(err.to_string().contains("/path/to/catalog.json"));
    }

    #[test]
    fn test_context_chaining() {
        let initial: Result<()> = Err(RfpError::catalog(
            "initial context",
            CatalogErrorKind::Empty,
        ));

        let err = initial.context("outer context");

        match err {
            Err(RfpError::Catalog { context, .. }) => {
                assert!(context.contains("outer context"), "{}", context);
                assert!(context.contains("initial context"), "{}", context);
            }
            _ => panic!("Expected Catalog error"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(RfpError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_option_context() {
        let none_value: Option<i32> = None;
        let result = none_value.context_none("missing value");
        match result {
            Err(RfpError::Validation(msg)) => assert_eq!(msg, "missing value"),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
