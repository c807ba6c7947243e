//! TCP Transport for DNS queries (RFC 1035 §4.2.2, RFC 7766)
//!
//! Each message is preceded by a two-octet length. One connection per
//! exchange; nothing is kept open between probes.

use super::{io_error, timeout_error, DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use dns_check_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const MAX_TCP_MESSAGE_SIZE: usize = 65535;

/// DNS over TCP transport
#[derive(Default)]
pub struct TcpTransport;

impl TcpTransport {
    pub fn new() -> Self {
        Self
    }

    async fn exchange(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
    ) -> Result<(Vec<u8>, Duration), DomainError> {
        let mut stream = TcpStream::connect(server)
            .await
            .map_err(|e| io_error(server, e))?;

        stream.set_nodelay(true).map_err(|e| io_error(server, e))?;

        let start = Instant::now();
        send_with_length_prefix(&mut stream, message_bytes)
            .await
            .map_err(|e| io_error(server, e))?;

        debug!(server = %server, message_len = message_bytes.len(), "TCP query sent");

        let response = read_with_length_prefix(&mut stream)
            .await
            .map_err(|e| io_error(server, e))?;
        let round_trip_time = start.elapsed();

        debug!(server = %server, response_len = response.len(), "TCP response received");

        Ok((response, round_trip_time))
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        if message_bytes.len() > MAX_TCP_MESSAGE_SIZE {
            return Err(DomainError::QueryEncoding(format!(
                "message too large for TCP framing: {} bytes",
                message_bytes.len()
            )));
        }

        let (response, round_trip_time) =
            tokio::time::timeout(timeout, self.exchange(message_bytes, server))
                .await
                .map_err(|_| timeout_error(server))??;

        Ok(TransportResponse {
            bytes: Bytes::from(response),
            protocol_used: "TCP",
            round_trip_time,
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "DNS message exceeds 65535 bytes")
    })?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let response_len = u16::from_be_bytes(len_buf) as usize;

    let mut response = vec![0u8; response_len];
    stream.read_exact(&mut response).await?;

    Ok(response)
}
