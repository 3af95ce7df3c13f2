//! Error taxonomy for layout generation.

/// Everything that can stop a [`BoardLayout`](super::BoardLayout) from being produced.
///
/// Validation runs before any builder, so an `InvalidConfiguration` always means
/// nothing was generated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// A caller-supplied parameter breaks one of the documented constraints.
    #[error("invalid configuration: {parameter} = {value} ({constraint})")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value, formatted for display.
        value: String,
        /// The constraint the value had to satisfy.
        constraint: &'static str,
    },
    /// Generated geometry failed a self-check. Points at a layout-constant bug,
    /// not at user input.
    #[error("layout invariant violated: {0}")]
    InvariantViolation(String),
}

impl LayoutError {
    pub(crate) fn invalid(
        parameter: &'static str,
        value: impl std::fmt::Display,
        constraint: &'static str,
    ) -> Self {
        LayoutError::InvalidConfiguration {
            parameter,
            value: value.to_string(),
            constraint,
        }
    }

    /// Name of the parameter that failed validation, if this is a configuration error.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            LayoutError::InvalidConfiguration { parameter, .. } => Some(parameter),
            LayoutError::InvariantViolation(_) => None,
        }
    }
}
