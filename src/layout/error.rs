//! Error types for the layout engine

use thiserror::Error;

/// Errors that can occur while resolving a workspace spec into a template.
///
/// Generation and validation never fail; clearance problems are reported as
/// [`Violation`](super::Violation) data instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The spec cannot be turned into a template
    #[error("invalid workspace spec: {reason}")]
    InvalidSpec { reason: String },

    /// The zones do not fit the room at the required spacing
    #[error("zone '{zone}' does not fit the room: {reason}")]
    TemplateOverflow { zone: String, reason: String },
}

impl LayoutError {
    /// Create an invalid spec error
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Create a template overflow error for the named zone
    pub fn overflow(zone: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TemplateOverflow {
            zone: zone.into(),
            reason: reason.into(),
        }
    }

    /// The zone that could not be placed, if any
    pub fn zone(&self) -> Option<&str> {
        match self {
            Self::TemplateOverflow { zone, .. } => Some(zone),
            Self::InvalidSpec { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_spec_display() {
        let err = LayoutError::invalid_spec("room width must be positive");
        assert_eq!(
            err.to_string(),
            "invalid workspace spec: room width must be positive"
        );
        assert_eq!(err.zone(), None);
    }

    #[test]
    fn test_overflow_display() {
        let err = LayoutError::overflow("workstations", "needs 9.0 m of width, room has 6.0 m");
        assert!(err.to_string().contains("'workstations'"));
        assert_eq!(err.zone(), Some("workstations"));
    }
}
