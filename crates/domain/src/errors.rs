use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Failed to encode DNS query: {0}")]
    QueryEncoding(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport error with {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("Unable to resolve server address {0}")]
    UnresolvableServer(String),

    #[error("records did not resolve: {0}")]
    Unresolved(String),

    #[error("Probe task aborted: {0}")]
    ProbeAborted(String),
}
