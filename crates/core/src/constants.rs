//! Constants used throughout the Smart Health Care core crate.

/// Environment variable holding the number of suggested treatments shown per search match.
pub const SUGGESTION_COUNT_ENV: &str = "SHC_SUGGESTION_COUNT";

/// Environment variable controlling whether the sample patients are loaded at startup.
pub const SEED_SAMPLE_DATA_ENV: &str = "SHC_SEED_SAMPLE_DATA";

/// Environment variable holding the REST listen address.
pub const REST_ADDR_ENV: &str = "SHC_REST_ADDR";

/// Default REST listen address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Upper bound for the configured suggestion count.
pub const MAX_SUGGESTION_COUNT: usize = 32;
