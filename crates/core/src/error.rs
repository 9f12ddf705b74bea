use crate::codec::CodecError;

/// Failures of registry operations.
///
/// None of these leave the registry modified.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no record found for patient: {0}")]
    RecordNotFound(String),
    #[error("no reading from device '{device}' for patient: {patient}")]
    DeviceNotFound { patient: String, device: String },
    #[error("no symptoms provided to search for")]
    InvalidSearch,
    #[error("stored device reading is unreadable: {0}")]
    Codec(#[from] CodecError),
}

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Failures when building records or resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid text: {0}")]
    Text(#[from] shc_types::TextError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
