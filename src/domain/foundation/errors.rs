//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

use super::ZoneKey;
use crate::domain::capability::Operation;
use crate::domain::request::AdFormat;

/// Error codes in the mediation layer's vocabulary.
///
/// The numeric values are the ones the mediation SDK expects on its
/// `on_failed_to_load` callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediationErrorCode {
    InternalError,
    InvalidRequest,
    NetworkError,
    NoFill,
}

impl MediationErrorCode {
    /// Returns the numeric code understood by the mediation layer.
    pub fn as_i32(&self) -> i32 {
        match self {
            MediationErrorCode::InternalError => 0,
            MediationErrorCode::InvalidRequest => 1,
            MediationErrorCode::NetworkError => 2,
            MediationErrorCode::NoFill => 3,
        }
    }
}

impl fmt::Display for MediationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MediationErrorCode::InternalError => "INTERNAL_ERROR",
            MediationErrorCode::InvalidRequest => "INVALID_REQUEST",
            MediationErrorCode::NetworkError => "NETWORK_ERROR",
            MediationErrorCode::NoFill => "NO_FILL",
        };
        write!(f, "{}", s)
    }
}

/// Error codes reported by the ad network when a fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkErrorCode {
    NoFill,
    NoNetwork,
    FetchTimeout,
    Unspecified,
    /// Any code the bridge has no dedicated mapping for.
    Other(i32),
}

impl NetworkErrorCode {
    pub const NO_FILL: i32 = 204;
    pub const UNSPECIFIED: i32 = -1;
    pub const FETCH_TIMEOUT: i32 = -102;
    pub const NO_NETWORK: i32 = -103;

    /// Decodes a raw network error code.
    pub fn from_raw(code: i32) -> Self {
        match code {
            Self::NO_FILL => NetworkErrorCode::NoFill,
            Self::UNSPECIFIED => NetworkErrorCode::Unspecified,
            Self::FETCH_TIMEOUT => NetworkErrorCode::FetchTimeout,
            Self::NO_NETWORK => NetworkErrorCode::NoNetwork,
            other => NetworkErrorCode::Other(other),
        }
    }

    /// Returns the raw network error code.
    pub fn as_raw(&self) -> i32 {
        match self {
            NetworkErrorCode::NoFill => Self::NO_FILL,
            NetworkErrorCode::Unspecified => Self::UNSPECIFIED,
            NetworkErrorCode::FetchTimeout => Self::FETCH_TIMEOUT,
            NetworkErrorCode::NoNetwork => Self::NO_NETWORK,
            NetworkErrorCode::Other(code) => *code,
        }
    }

    /// Translates into the mediation vocabulary.
    pub fn to_mediation(&self) -> MediationErrorCode {
        match self {
            NetworkErrorCode::NoFill => MediationErrorCode::NoFill,
            NetworkErrorCode::NoNetwork | NetworkErrorCode::FetchTimeout => {
                MediationErrorCode::NetworkError
            }
            NetworkErrorCode::Unspecified | NetworkErrorCode::Other(_) => {
                MediationErrorCode::InternalError
            }
        }
    }
}

impl fmt::Display for NetworkErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkErrorCode::NoFill => write!(f, "no fill ({})", Self::NO_FILL),
            NetworkErrorCode::NoNetwork => write!(f, "no network ({})", Self::NO_NETWORK),
            NetworkErrorCode::FetchTimeout => write!(f, "fetch timeout ({})", Self::FETCH_TIMEOUT),
            NetworkErrorCode::Unspecified => write!(f, "unspecified ({})", Self::UNSPECIFIED),
            NetworkErrorCode::Other(code) => write!(f, "code {}", code),
        }
    }
}

/// Errors caused by how the bridge was set up rather than by the network.
///
/// These are fatal to the current request and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("{format} ads on SDK {version_code} require an activity host")]
    InvalidHostContext { format: AdFormat, version_code: u32 },

    #[error("{operation} for zone '{zone}' is not supported by the installed SDK")]
    CapabilityUnavailable { operation: Operation, zone: ZoneKey },

    #[error("no network ad size matches {width}x{height}")]
    UnsupportedAdSize { width: u32, height: u32 },
}

/// Request-level error surfaced to the mediation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("no fill")]
    NoFill,

    #[error("network unavailable")]
    Network,

    #[error("fetch timed out")]
    Timeout,

    #[error("internal error: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        BridgeError::Internal(message.into())
    }

    /// Returns true for the one failure kind the inventory cache can recover.
    pub fn is_no_fill(&self) -> bool {
        matches!(self, BridgeError::NoFill)
    }

    /// Returns the code reported to the mediation layer.
    pub fn mediation_code(&self) -> MediationErrorCode {
        match self {
            BridgeError::Configuration(ConfigurationError::UnsupportedAdSize { .. }) => {
                MediationErrorCode::InternalError
            }
            BridgeError::Configuration(_) => MediationErrorCode::InvalidRequest,
            BridgeError::NoFill => MediationErrorCode::NoFill,
            BridgeError::Network | BridgeError::Timeout => MediationErrorCode::NetworkError,
            BridgeError::Internal(_) => MediationErrorCode::InternalError,
        }
    }
}

impl From<NetworkErrorCode> for BridgeError {
    fn from(code: NetworkErrorCode) -> Self {
        match code {
            NetworkErrorCode::NoFill => BridgeError::NoFill,
            NetworkErrorCode::NoNetwork => BridgeError::Network,
            NetworkErrorCode::FetchTimeout => BridgeError::Timeout,
            other => BridgeError::Internal(format!("ad network failure: {}", other)),
        }
    }
}

/// Raised when a status change is not allowed by its state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot transition from {from} to {to}")]
pub struct InvalidTransition {
    pub from: String,
    pub to: String,
}
