use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire transport used to reach a name server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Udp,
    Tcp,
}

impl TransportKind {
    pub fn from_tcp_flag(tcp: bool) -> Self {
        if tcp {
            TransportKind::Tcp
        } else {
            TransportKind::Udp
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            TransportKind::Udp => "UDP",
            TransportKind::Tcp => "TCP",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.protocol_name())
    }
}

impl FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "udp" => Ok(TransportKind::Udp),
            "tcp" => Ok(TransportKind::Tcp),
            _ => Err(format!("Invalid transport '{}'. Expected 'udp' or 'tcp'", s)),
        }
    }
}

/// Joins a host (name, IPv4 or IPv6 literal) and a port into `host:port`,
/// bracketing IPv6 literals.
pub fn join_host_port(host: &str, port: u16) -> String {
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    if bare.contains(':') {
        format!("[{}]:{}", bare, port)
    } else {
        format!("{}:{}", bare, port)
    }
}
