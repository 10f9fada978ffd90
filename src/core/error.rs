//! Error types for the association service

use thiserror::Error;

/// Result type for platform adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Result type for service facade operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Faults raised by the platform adapter
///
/// These are environmental faults in the platform's network management
/// surface, not outcomes of an attempt. Outcomes such as "network not
/// found" travel through listeners as [`ConnectOutcome`](crate::core::types::ConnectOutcome)
/// values instead.
#[derive(Error, Debug, Clone)]
pub enum AdapterError {
    #[error("Radio control failed: {0}")]
    RadioControl(String),

    #[error("Scan failed: {0}")]
    ScanFailed(String),

    #[error("Profile store operation failed: {0}")]
    ProfileStore(String),

    #[error("Platform service unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the facade's synchronous operations
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),
}
