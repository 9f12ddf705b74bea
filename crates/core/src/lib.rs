//! # Smart Health Care core
//!
//! In-memory patient records for the Smart Health Care demo:
//! - [`record`]: patient records with cached, symptom-driven advice
//! - [`registry`]: ordered registry with name lookup, symptom search and partial updates
//! - [`codec`]: reversible obfuscation of stored device readings (not encryption)
//! - [`suggestions`]: randomly sampled treatment suggestions for search results
//! - [`patient`]: mutex-guarded service handle for multi-threaded callers
//!
//! **No I/O**: the core never prints, reads input, or touches the network. Console and HTTP
//! concerns live in `shc-cli` and `api-rest`.

pub mod advice;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod patient;
pub mod record;
pub mod registry;
pub mod seed;
pub mod suggestions;
pub mod validation;

pub use config::CoreConfig;
pub use error::{PatientError, PatientResult, RegistryError, RegistryResult};
pub use patient::PatientService;
pub use record::{PatientRecord, RecordUpdate};
pub use registry::{Registry, SearchMatch, SearchReport};
pub use shc_types::{NonEmptyText, PatientName, TextError};
