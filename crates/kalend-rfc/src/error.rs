use thiserror::Error;

use crate::rfc::ical::expand::ConversionError;
use crate::rfc::ical::parse::RRuleError;

/// Errors surfaced by recurrence expansion and ICS serialization.
#[derive(Error, Debug)]
pub enum RfcError {
    /// A required field is missing or a value is malformed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The recurrence rule does not match the accepted grammar.
    #[error("RRule validation error: {0}")]
    RRule(#[from] RRuleError),

    /// Date arithmetic failed on otherwise valid input.
    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Timezone error: {0}")]
    Timezone(#[from] ConversionError),
}

impl RfcError {
    /// Returns whether this error stems from invalid caller input rather than
    /// a failure during computation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::RRule(_))
    }
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
