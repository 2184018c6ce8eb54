//! Unified error types for the linkplan workspace.
//!
//! The first three variants are resolution failures and carry the component
//! names needed to fix the declarative input. The rest cover loading the
//! input in the first place.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Two components were registered under the same name.
    #[error("duplicate component name: \"{name}\"")]
    DuplicateComponent {
        /// The name registered twice.
        name: String,
    },

    /// A component requires a component that is not in the graph.
    #[error("component \"{component}\" requires unknown component \"{missing}\"")]
    UnknownDependency {
        /// Component declaring the requirement.
        component: String,
        /// Name that could not be found.
        missing: String,
    },

    /// The requirement graph contains a cycle.
    #[error("cyclic dependency detected: {}", cycle.join(" -> "))]
    CyclicDependency {
        /// Closed walk in requirement direction; first and last entries are equal.
        cycle: Vec<String>,
    },

    /// A configuration or declaration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A version string could not be parsed.
    #[error("invalid version \"{input}\": {reason}")]
    InvalidVersion {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// A YAML manifest or configuration document is malformed.
    #[error("manifest error: {source}")]
    Manifest {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyclic_dependency_message_joins_names() {
        let err = PlanError::CyclicDependency {
            cycle: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "cyclic dependency detected: a -> b -> a");
    }

    #[test]
    fn unknown_dependency_names_both_sides() {
        let err = PlanError::UnknownDependency {
            component: "OpenEXR".into(),
            missing: "Imath".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"OpenEXR\""), "got: {msg}");
        assert!(msg.contains("\"Imath\""), "got: {msg}");
    }
}
