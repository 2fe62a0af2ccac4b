use crate::transport::TransportError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything the reader can fail with. Errors are handed back as they are;
/// the caller decides whether to abort or report and continue.
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// Bad ABI, bad contract address, missing address-book role, bad URL.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The endpoint could not be reached, or did not answer a liveness probe.
    #[error("network error: {0}")]
    Network(#[source] TransportError),
    /// The call reached the node but reverted or returned undecodable data.
    #[error("contract call `{method}` failed: {source}")]
    ContractCall {
        method: &'static str,
        #[source]
        source: BoxError,
    },
    /// Rejected locally, before anything went on the wire.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ReaderError {
    pub(crate) fn contract_call(method: &'static str, source: impl Into<BoxError>) -> Self {
        Self::ContractCall {
            method,
            source: source.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_contract_call(&self) -> bool {
        matches!(self, Self::ContractCall { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

pub type Result<T, E = ReaderError> = std::result::Result<T, E>;
