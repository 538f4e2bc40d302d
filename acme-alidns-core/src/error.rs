//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

pub use acme_alidns_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No candidate suffix of the record name is a zone managed by the account.
    #[error("Unable to determine AliCloud domain for {record_name}.")]
    ZoneNotFound { record_name: String },

    /// The record name is empty or has empty labels.
    #[error("Invalid record name: {0:?}")]
    InvalidRecordName(String),

    /// Any provider fault during a mutating call (authentication, network, API).
    #[error("Error communicating with the AliCloud API: {0}")]
    Provider(#[from] ProviderError),

    /// `perform`/`cleanup` called before credentials were supplied.
    #[error("Plugin has not been prepared.")]
    NotConfigured,

    /// Credentials file missing, unreadable or incomplete.
    #[error("Credential error: {0}")]
    Credential(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ZoneNotFound { .. } | Self::InvalidRecordName(_) | Self::Credential(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::NotConfigured => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
