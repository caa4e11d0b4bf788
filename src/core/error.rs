use thiserror::Error;

/// Errors that can occur during invoice construction or encoding.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KsefError {
    /// A required field is missing, malformed, or an enumerated field holds
    /// a code outside its closed set. Not retryable: the input must be fixed.
    #[error("invalid field value: {}", join_errors(.0))]
    InvalidFieldValue(Vec<ValidationError>),

    /// An encoder invariant was violated. Unreachable for a validated invoice.
    #[error("encoding failure: {0}")]
    EncodingFailure(String),
}

impl KsefError {
    /// Shorthand for a single-field `InvalidFieldValue`.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFieldValue(vec![ValidationError::new(field, message)])
    }

    /// The individual validation failures, if this is an `InvalidFieldValue`.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidFieldValue(errors) => errors,
            Self::EncodingFailure(_) => &[],
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "issuer.address.city").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// FA (1) element the field is written to, if any (e.g. "P_2").
    pub element: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(element) = &self.element {
            write!(f, "[{}] {}: {}", element, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without an element reference.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            element: None,
        }
    }

    /// Create a validation error tied to an FA (1) element.
    pub fn with_element(
        field: impl Into<String>,
        message: impl Into<String>,
        element: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            element: Some(element.into()),
        }
    }
}
