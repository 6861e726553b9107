//! Core traits for the import pipeline
//!
//! The batch builder depends on these abstractions rather than on concrete
//! rule sets, so classification can be swapped or tested in isolation.

use crate::core::classifier::Classification;

/// Assigns a category to a transaction description
///
/// Implementations must be deterministic: the same description always yields
/// the same classification, so re-importing the same text is reproducible.
pub trait Classifier {
    /// Classify one description
    fn classify(&self, description: &str) -> Classification<'_>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn classify(&self, description: &str) -> Classification<'_> {
        (**self).classify(description)
    }
}
