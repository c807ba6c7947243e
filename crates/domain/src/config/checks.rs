use serde::{Deserialize, Serialize};

/// Exit-status escalation and optional metric families.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChecksConfig {
    /// Raise `insecure_status` when a server does not set the AD bit.
    #[serde(default)]
    pub validate_dnssec: bool,

    #[serde(default = "default_status")]
    pub insecure_status: i32,

    /// Raise `unresolved_status` when a query fails or is not NOERROR.
    #[serde(default)]
    pub validate_resolution: bool,

    #[serde(default = "default_status")]
    pub unresolved_status: i32,

    /// Emit `dns_secure`.
    #[serde(default = "default_true")]
    pub report_dnssec: bool,

    /// Emit `dns_response_time` for failed probes too.
    #[serde(default = "default_true")]
    pub report_response_time_on_failure: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            validate_dnssec: false,
            insecure_status: default_status(),
            validate_resolution: false,
            unresolved_status: default_status(),
            report_dnssec: true,
            report_response_time_on_failure: true,
        }
    }
}

fn default_status() -> i32 {
    1
}

fn default_true() -> bool {
    true
}
