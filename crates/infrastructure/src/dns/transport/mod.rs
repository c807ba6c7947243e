pub mod resolver;
pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use bytes::Bytes;
use dns_check_domain::{DomainError, TransportKind};
use std::net::SocketAddr;
use std::time::Duration;

pub use resolver::resolve_server;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Bytes,

    pub protocol_used: &'static str,

    /// From the query write to the response read; socket setup is excluded.
    pub round_trip_time: Duration,
}

/// One request/response exchange with a name server.
///
/// `timeout` bounds the whole exchange, connection setup included, while
/// the reported round trip covers only the query on the wire.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

#[async_trait]
impl DnsTransport for Transport {
    async fn send(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => t.send(message_bytes, server, timeout).await,
            Self::Tcp(t) => t.send(message_bytes, server, timeout).await,
        }
    }

    fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(t) => t.protocol_name(),
            Self::Tcp(t) => t.protocol_name(),
        }
    }
}

/// `udp_payload_size` sizes the UDP receive buffer; TCP ignores it.
pub fn create_transport(kind: TransportKind, udp_payload_size: u16) -> Transport {
    match kind {
        TransportKind::Udp => Transport::Udp(udp::UdpTransport::new(udp_payload_size)),
        TransportKind::Tcp => Transport::Tcp(tcp::TcpTransport::new()),
    }
}

/// Maps a socket error to the transport error taxonomy.
pub(crate) fn io_error(server: SocketAddr, error: std::io::Error) -> DomainError {
    match error.kind() {
        std::io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused {
            server: server.to_string(),
        },
        std::io::ErrorKind::TimedOut => DomainError::TransportTimeout {
            server: server.to_string(),
        },
        _ => DomainError::TransportIo {
            server: server.to_string(),
            reason: error.to_string(),
        },
    }
}

pub(crate) fn timeout_error(server: SocketAddr) -> DomainError {
    DomainError::TransportTimeout {
        server: server.to_string(),
    }
}
