use crate::dns_protocol::TransportKind;
use crate::dns_record::{RecordClass, RecordType};
use std::time::Duration;

/// EDNS0 payload size advertised when DNSSEC records are requested.
pub const DEFAULT_UDP_PAYLOAD_SIZE: u16 = 4096;

/// Payload size every DNS implementation must accept (RFC 1035 §2.3.4).
pub const MIN_UDP_PAYLOAD_SIZE: u16 = 512;

pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// Query template shared by every probe of a run.
///
/// The domain and server vary per probe and are supplied at resolve time;
/// everything else is fixed once the configuration has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub record_class: RecordClass,
    pub record_type: RecordType,
    pub port: u16,
    pub transport: TransportKind,
    pub request_dnssec: bool,
    pub udp_payload_size: u16,
    pub timeout: Duration,
}

impl QuerySpec {
    pub fn new(record_class: RecordClass, record_type: RecordType, port: u16) -> Self {
        Self {
            record_class,
            record_type,
            port,
            transport: TransportKind::Udp,
            request_dnssec: true,
            udp_payload_size: DEFAULT_UDP_PAYLOAD_SIZE,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn with_transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self
    }

    /// Values below 512 are raised to 512.
    pub fn with_udp_payload_size(mut self, size: u16) -> Self {
        self.udp_payload_size = size.max(MIN_UDP_PAYLOAD_SIZE);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Appends the root label when missing.
pub fn fqdn(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{}.", domain)
    }
}
