//! Error types for layout and topology generation

use thiserror::Error;

/// Boxed error raised by an external collaborator (solid kernel or structural solver)
pub type ExternalError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for structure generation
#[derive(Error, Debug)]
pub enum LayoutError {
    /// A parameter or derived quantity is out of range.
    #[error("Invalid configuration: {quantity} = {value} ({reason})")]
    Configuration {
        quantity: String,
        value: f64,
        reason: String,
    },

    /// A component's collected points cannot be chained into members.
    #[error("Topology error in {component}: {reason}")]
    Topology { component: String, reason: String },

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Node '{0}' not found in model")]
    NodeNotFound(String),

    #[error("Member '{0}' not found in model")]
    MemberNotFound(String),

    #[error("Material '{0}' not found in model")]
    MaterialNotFound(String),

    #[error("Section '{0}' not found in model")]
    SectionNotFound(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Solid modelling kernel failed: {0}")]
    Kernel(#[source] ExternalError),

    #[error("Structural model rejected input: {0}")]
    Solver(#[source] ExternalError),

    #[error("Malformed parameters: {0}")]
    Parameters(#[from] serde_json::Error),
}

impl LayoutError {
    pub(crate) fn configuration(quantity: &str, value: f64, reason: &str) -> Self {
        Self::Configuration {
            quantity: quantity.to_string(),
            value,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn topology(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Topology {
            component: component.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;
