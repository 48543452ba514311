//! Common error infrastructure for aerial-core.
//!
//! Domain-specific errors (e.g. [`TransactionConflict`](crate::loadout::TransactionConflict))
//! live next to the operations that produce them. This module hosts the shared
//! severity classification and the load-time [`ConfigurationError`].
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Rich Context**: Configuration errors name the object and key that failed
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No partial state**: An error never leaves a compiler cache or loadout half-updated

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The request was refused but the same request may succeed later
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Fatal**: The object being loaded cannot be constructed at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative action.
    ///
    /// Examples: slot occupied by another item, not enough items to take
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: negative amount, unknown enum name in content
    Validation,

    /// Fatal error - the object cannot be loaded.
    ///
    /// Examples: missing required property, unknown equipment identifier
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all aerial-core errors.
///
/// Provides a uniform interface for error classification across the crate.
/// All error enums should implement this trait and derive `thiserror::Error`
/// for their `Display`/`Error` impls.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for metrics and for matching in tests without depending on
    /// the display text.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Malformed or missing declarative data, raised while loading one object.
///
/// Loading code catches this per object, reports it with context and keeps
/// loading the remaining objects.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// A required property is absent.
    #[error("'{key}' must be defined")]
    MissingProperty { key: String },

    /// A property exists but has the wrong type.
    #[error("'{key}' must be {expected}")]
    WrongType { key: String, expected: &'static str },

    /// A numeric property is outside its permitted range.
    #[error("'{key}' must be {constraint} (got {value})")]
    OutOfRange {
        key: String,
        constraint: &'static str,
        value: f64,
    },

    /// An enumerated property names no constant of its type.
    #[error("'{key}' has unknown value '{value}'")]
    UnknownVariant { key: String, value: String },

    /// An identifier does not resolve in the equipment catalog.
    #[error("unknown {kind} '{id}'")]
    UnknownEquipment { kind: &'static str, id: String },

    /// Amount bounds are inconsistent (e.g. min > max).
    #[error("invalid amount bounds: min {min}, default {default}, max {max}")]
    InvalidAmountBounds { min: i32, default: i32, max: i32 },

    /// Free-form structural problem (item list syntax, empty lists, ...).
    #[error("{0}")]
    Invalid(String),

    /// Wraps an inner error with the name of the object that contained it.
    #[error("error in '{name}': {source}")]
    InObject {
        name: String,
        #[source]
        source: Box<ConfigurationError>,
    },
}

impl ConfigurationError {
    /// Wraps this error with the name of the enclosing object.
    pub fn within(self, name: impl Into<String>) -> Self {
        Self::InObject {
            name: name.into(),
            source: Box::new(self),
        }
    }
}

impl GameError for ConfigurationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownVariant { .. } | Self::OutOfRange { .. } => ErrorSeverity::Validation,
            Self::InObject { source, .. } => source.severity(),
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingProperty { .. } => "CONFIG_MISSING_PROPERTY",
            Self::WrongType { .. } => "CONFIG_WRONG_TYPE",
            Self::OutOfRange { .. } => "CONFIG_OUT_OF_RANGE",
            Self::UnknownVariant { .. } => "CONFIG_UNKNOWN_VARIANT",
            Self::UnknownEquipment { .. } => "CONFIG_UNKNOWN_EQUIPMENT",
            Self::InvalidAmountBounds { .. } => "CONFIG_INVALID_AMOUNT_BOUNDS",
            Self::Invalid(_) => "CONFIG_INVALID",
            Self::InObject { source, .. } => source.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_error_keeps_inner_code_and_reports_path() {
        let err = ConfigurationError::MissingProperty {
            key: "burst_amount".into(),
        }
        .within("machine_gun")
        .within("gun_item");

        assert_eq!(err.error_code(), "CONFIG_MISSING_PROPERTY");
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(
            err.to_string(),
            "error in 'gun_item': error in 'machine_gun': 'burst_amount' must be defined"
        );
    }
}
