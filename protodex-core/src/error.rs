//! Error types for descriptor construction and lookup
//!
//! Two categories: usage errors (a caller asked for a method the service
//! does not declare) surface as [`UnknownMethod`] diagnostics and are
//! recoverable; consistency errors (the declared method list and the
//! descriptor set disagree) indicate a generator bug and are meant to fail
//! fast at construction or validation time.

use thiserror::Error;

/// Result type alias for descriptor operations
pub type Result<T> = std::result::Result<T, DescriptorError>;

/// Diagnostic for a method lookup that missed.
///
/// Carries the offending method name, the service identity, and the full
/// declared method list in declaration order. The rendered text is stable
/// and tooling may pattern-match on it:
///
/// ```text
/// No method "SayGoodbye" available for service 'Greeter'. Available methods are: SayHello
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No method {method:?} available for service '{service}'. Available methods are: {}", .available.join(", "))]
pub struct UnknownMethod {
    /// Service the lookup ran against
    pub service: String,
    /// Method name that was requested
    pub method: String,
    /// Declared method names, in declaration order
    pub available: Vec<String>,
}

/// Unified error type for descriptor construction and lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    // ===== Construction Errors =====
    #[error("Service name cannot be empty")]
    EmptyServiceName,

    #[error("Package name cannot be empty")]
    EmptyPackageName,

    #[error("Method name cannot be empty on service '{service}'")]
    EmptyMethodName { service: String },

    #[error("Duplicate method {method:?} on service '{service}'")]
    DuplicateMethod { service: String, method: String },

    // ===== Completeness Errors =====
    #[error("Service '{service}' declares methods with no descriptor: {}", .missing.join(", "))]
    MissingMethods {
        service: String,
        missing: Vec<String>,
    },

    #[error("Service '{service}' has descriptors for undeclared methods: {}", .extra.join(", "))]
    UndeclaredMethods { service: String, extra: Vec<String> },

    // ===== Lookup Errors =====
    #[error(transparent)]
    UnknownMethod(#[from] UnknownMethod),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_method_display() {
        let err = UnknownMethod {
            service: "Widgets".to_string(),
            method: "Bogus".to_string(),
            available: vec!["Get".to_string(), "List".to_string(), "Watch".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "No method \"Bogus\" available for service 'Widgets'. Available methods are: Get, List, Watch"
        );
    }

    #[test]
    fn test_unknown_method_display_empty_service() {
        let err = UnknownMethod {
            service: "Void".to_string(),
            method: "Anything".to_string(),
            available: vec![],
        };
        assert_eq!(
            err.to_string(),
            "No method \"Anything\" available for service 'Void'. Available methods are: "
        );
    }

    #[test]
    fn test_missing_methods_display() {
        let err = DescriptorError::MissingMethods {
            service: "Greeter".to_string(),
            missing: vec!["SayHello".to_string(), "SayHelloAgain".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Service 'Greeter' declares methods with no descriptor: SayHello, SayHelloAgain"
        );
    }

    #[test]
    fn test_unknown_method_into_descriptor_error() {
        let diag = UnknownMethod {
            service: "Widgets".to_string(),
            method: "Bogus".to_string(),
            available: vec!["Get".to_string()],
        };
        let err: DescriptorError = diag.clone().into();
        // Transparent wrapping keeps the diagnostic text intact
        assert_eq!(err.to_string(), diag.to_string());
    }
}
