use async_trait::async_trait;
use bytes::Bytes;
use dns_check_domain::DomainError;
use dns_check_infrastructure::dns::transport::{DnsTransport, TransportResponse};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = dyn Fn(&[u8]) -> Result<Vec<u8>, DomainError> + Send + Sync;

/// Transport whose answer is computed from the query bytes, no sockets.
pub struct ScriptedTransport {
    responder: Box<Responder>,
    round_trip_time: Duration,
    sent: Arc<Mutex<Vec<(Vec<u8>, SocketAddr, Duration)>>>,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, DomainError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            round_trip_time: Duration::from_millis(1),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Echoes the query ID with QR set and the given low flag octet.
    pub fn answering(flags_lo: u8) -> Self {
        Self::new(move |query| {
            let mut response = query[..12].to_vec();
            response[2] = 0x81;
            response[3] = flags_lo;
            response[4..12].copy_from_slice(&[0; 8]);
            Ok(response)
        })
    }

    /// Round trip reported with every answer.
    pub fn with_round_trip_time(mut self, round_trip_time: Duration) -> Self {
        self.round_trip_time = round_trip_time;
        self
    }

    pub fn failing(error: DomainError) -> Self {
        Self::new(move |_| Err(error.clone()))
    }

    pub fn sent(&self) -> Vec<(Vec<u8>, SocketAddr, Duration)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsTransport for ScriptedTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        self.sent
            .lock()
            .unwrap()
            .push((message_bytes.to_vec(), server, timeout));

        let bytes = (self.responder)(message_bytes)?;
        Ok(TransportResponse {
            bytes: Bytes::from(bytes),
            protocol_used: "SCRIPTED",
            round_trip_time: self.round_trip_time,
        })
    }

    fn protocol_name(&self) -> &'static str {
        "SCRIPTED"
    }
}
