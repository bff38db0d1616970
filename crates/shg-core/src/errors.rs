//! Structured error types shared across SHG crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`HyperError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (node labels, arities, semiring names).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the hypergraph engine.
///
/// Every variant is a deterministic function of malformed input; none of them
/// is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HyperError {
    /// Two different semiring instantiations met at a runtime boundary.
    #[error("type mismatch: {0}")]
    TypeMismatch(ErrorInfo),
    /// A traversal was requested before a root node was designated.
    #[error("missing root: {0}")]
    MissingRoot(ErrorInfo),
    /// The operation is not defined for the semiring in use.
    #[error("unsupported operation: {0}")]
    Unsupported(ErrorInfo),
    /// A directed cycle is reachable from the root.
    #[error("cyclic hypergraph: {0}")]
    Cyclic(ErrorInfo),
    /// Structural misuse of a hypergraph or its inputs.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Malformed configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl HyperError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HyperError::TypeMismatch(info)
            | HyperError::MissingRoot(info)
            | HyperError::Unsupported(info)
            | HyperError::Cyclic(info)
            | HyperError::Graph(info)
            | HyperError::Config(info)
            | HyperError::Serde(info) => info,
        }
    }

    /// Returns the stable error code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry to the payload, preserving the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.map_info(|info| info.with_context(key, value))
    }

    /// Attaches a remediation hint, preserving the error family.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.map_info(|info| info.with_hint(hint))
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            HyperError::TypeMismatch(info) => HyperError::TypeMismatch(f(info)),
            HyperError::MissingRoot(info) => HyperError::MissingRoot(f(info)),
            HyperError::Unsupported(info) => HyperError::Unsupported(f(info)),
            HyperError::Cyclic(info) => HyperError::Cyclic(f(info)),
            HyperError::Graph(info) => HyperError::Graph(f(info)),
            HyperError::Config(info) => HyperError::Config(f(info)),
            HyperError::Serde(info) => HyperError::Serde(f(info)),
        }
    }
}

/// Shorthand for a structural [`HyperError::Graph`] error.
pub fn graph_error(code: impl Into<String>, message: impl Into<String>) -> HyperError {
    HyperError::Graph(ErrorInfo::new(code, message))
}

/// Error raised when a traversal needs a root that was never set.
pub fn missing_root() -> HyperError {
    HyperError::MissingRoot(
        ErrorInfo::new("missing-root", "hypergraph root is not set")
            .with_hint("call `set_root` before running a traversal"),
    )
}
