//! Suggested treatments shown alongside symptom search results.
//!
//! This is the only randomised part of the crate. Nothing here touches stored records.

use rand::seq::SliceRandom;
use rand::Rng;

/// Catalogue of general treatment suggestions.
pub const SUGGESTIONS: [&str; 8] = [
    "Healthy diet",
    "Drink more water",
    "Limit alcohol intake",
    "Proper sleep",
    "Avoid stress",
    "Exercise",
    "Smoking cessation",
    "Eat nourishing food",
];

/// Number of suggestions shown per match unless configured otherwise.
pub const DEFAULT_SUGGESTION_COUNT: usize = 3;

/// Draws `min(count, catalogue.len())` distinct entries without replacement.
///
/// The order of the returned entries is unspecified.
pub fn sample_suggestions<'a, R: Rng + ?Sized>(
    catalogue: &[&'a str],
    count: usize,
    rng: &mut R,
) -> Vec<&'a str> {
    catalogue.choose_multiple(rng, count).copied().collect()
}
