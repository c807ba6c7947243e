use crate::query_spec::{DEFAULT_TIMEOUT_MS, DEFAULT_UDP_PAYLOAD_SIZE};
use serde::{Deserialize, Serialize};

/// What to query and where.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeSection {
    #[serde(default)]
    pub domains: Vec<String>,

    #[serde(default)]
    pub servers: Vec<String>,

    #[serde(default = "default_class")]
    pub class: String,

    #[serde(default = "default_record_type", rename = "type")]
    pub record_type: String,

    /// Kept as text so a non-numeric value is reported, not rejected by serde.
    #[serde(default = "default_port")]
    pub port: String,

    #[serde(default)]
    pub tcp: bool,

    #[serde(default = "default_udp_payload_size")]
    pub udp_payload_size: u16,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ProbeSection {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            servers: Vec::new(),
            class: default_class(),
            record_type: default_record_type(),
            port: default_port(),
            tcp: false,
            udp_payload_size: default_udp_payload_size(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_class() -> String {
    "IN".to_string()
}

fn default_record_type() -> String {
    "A".to_string()
}

fn default_port() -> String {
    "53".to_string()
}

fn default_udp_payload_size() -> u16 {
    DEFAULT_UDP_PAYLOAD_SIZE
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}
