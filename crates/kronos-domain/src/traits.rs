//! Trait definitions for lookups the pipeline delegates
//!
//! Implementations live in the pipeline crate or in callers.

/// Resolves the operator a phone number belongs to
///
/// Returning `None` is a valid terminal state; the classifier labels such
/// numbers with [`crate::UNKNOWN_OPERATOR`].
pub trait OperatorLookup {
    /// Look up the operator for a number
    fn operator_for(&self, number: &str) -> Option<String>;
}

impl<F> OperatorLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn operator_for(&self, number: &str) -> Option<String> {
        self(number)
    }
}
