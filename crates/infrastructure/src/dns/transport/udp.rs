//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). The receive buffer matches the EDNS0
//! payload size advertised in the query. Truncated answers are returned to
//! the caller unchanged. Datagrams from any address other than the server
//! are dropped and the read continues.

use super::{io_error, timeout_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use dns_check_domain::query_spec::MIN_UDP_PAYLOAD_SIZE;
use dns_check_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// DNS over UDP transport
pub struct UdpTransport {
    max_response_size: usize,
}

impl UdpTransport {
    pub fn new(udp_payload_size: u16) -> Self {
        Self {
            max_response_size: udp_payload_size.max(MIN_UDP_PAYLOAD_SIZE) as usize,
        }
    }

    async fn exchange(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
    ) -> Result<(Vec<u8>, Duration), DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if server.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;

        let start = Instant::now();
        let bytes_sent = socket
            .send_to(message_bytes, server)
            .await
            .map_err(|e| io_error(server, e))?;

        debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; self.max_response_size];
        loop {
            let (bytes_received, from_addr) = socket
                .recv_from(&mut recv_buf)
                .await
                .map_err(|e| io_error(server, e))?;

            if from_addr != server {
                warn!(
                    expected = %server,
                    received_from = %from_addr,
                    "Ignoring UDP datagram from unexpected source"
                );
                continue;
            }

            let round_trip_time = start.elapsed();
            recv_buf.truncate(bytes_received);

            debug!(server = %server, bytes_received = bytes_received, "UDP response received");

            return Ok((recv_buf, round_trip_time));
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let (response, round_trip_time) =
            tokio::time::timeout(timeout, self.exchange(message_bytes, server))
                .await
                .map_err(|_| timeout_error(server))??;

        Ok(TransportResponse {
            bytes: Bytes::from(response),
            protocol_used: "UDP",
            round_trip_time,
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
