use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::checks::ChecksConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::probe::ProbeSection;
use crate::dns_protocol::TransportKind;
use crate::dns_record::{RecordClass, RecordType};
use crate::query_spec::QuerySpec;
use crate::validators::{parse_port, validate_domain_name};

const LOCAL_CONFIG_PATH: &str = "dns-check.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dns-check/config.toml";

/// Main configuration structure for dns-check
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProbeConfig {
    /// Domains, servers and query parameters
    #[serde(default)]
    pub probe: ProbeSection,

    /// Exit-status escalation
    #[serde(default)]
    pub checks: ChecksConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration that passed [`ProbeConfig::validate`], with every textual
/// field parsed into its typed form.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProbe {
    pub domains: Vec<String>,
    pub servers: Vec<String>,
    pub query: QuerySpec,
    pub checks: ChecksConfig,
}

impl ProbeConfig {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dns-check.toml in current directory
    /// 3. /etc/dns-check/config.toml
    /// 4. Default configuration
    ///
    /// Command-line overrides are applied on top of whichever source won.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(domains) = overrides.domains {
            self.probe.domains = domains;
        }
        if let Some(servers) = overrides.servers {
            self.probe.servers = servers;
        }
        if let Some(class) = overrides.class {
            self.probe.class = class;
        }
        if let Some(record_type) = overrides.record_type {
            self.probe.record_type = record_type;
        }
        if let Some(port) = overrides.port {
            self.probe.port = port;
        }
        if let Some(tcp) = overrides.tcp {
            self.probe.tcp = tcp;
        }
        if let Some(size) = overrides.udp_payload_size {
            self.probe.udp_payload_size = size;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.probe.timeout_ms = timeout_ms;
        }
        if let Some(validate) = overrides.validate_dnssec {
            self.checks.validate_dnssec = validate;
        }
        if let Some(status) = overrides.insecure_status {
            self.checks.insecure_status = status;
        }
        if let Some(validate) = overrides.validate_resolution {
            self.checks.validate_resolution = validate;
        }
        if let Some(status) = overrides.unresolved_status {
            self.checks.unresolved_status = status;
        }
        if let Some(report) = overrides.report_dnssec {
            self.checks.report_dnssec = report;
        }
        if let Some(report) = overrides.report_response_time_on_failure {
            self.checks.report_response_time_on_failure = report;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    /// Validate configuration before any query is sent.
    ///
    /// Checks run in a fixed order and the first failure is returned.
    pub fn validate(&self) -> Result<ValidatedProbe, ConfigError> {
        if self.probe.domains.is_empty() {
            return Err(ConfigError::Validation(
                "must supply at least one domain to check".to_string(),
            ));
        }

        let invalid: Vec<&str> = self
            .probe
            .domains
            .iter()
            .filter(|domain| validate_domain_name(domain).is_err())
            .map(String::as_str)
            .collect();
        if !invalid.is_empty() {
            return Err(ConfigError::Validation(format!(
                "invalid domain names specified: [{}]",
                invalid.join(" ")
            )));
        }

        if self.probe.servers.is_empty() {
            return Err(ConfigError::Validation(
                "must supply at least one name server".to_string(),
            ));
        }

        let record_type: RecordType = self
            .probe
            .record_type
            .parse()
            .map_err(ConfigError::Validation)?;

        let record_class: RecordClass = self
            .probe
            .class
            .parse()
            .map_err(ConfigError::Validation)?;

        let port = parse_port(&self.probe.port).map_err(ConfigError::Validation)?;

        if self.probe.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "timeout must be greater than zero".to_string(),
            ));
        }

        let query = QuerySpec::new(record_class, record_type, port)
            .with_transport(TransportKind::from_tcp_flag(self.probe.tcp))
            .with_udp_payload_size(self.probe.udp_payload_size)
            .with_timeout(Duration::from_millis(self.probe.timeout_ms));

        Ok(ValidatedProbe {
            domains: self.probe.domains.clone(),
            servers: self.probe.servers.clone(),
            query,
            checks: self.checks.clone(),
        })
    }
}

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub domains: Option<Vec<String>>,
    pub servers: Option<Vec<String>>,
    pub class: Option<String>,
    pub record_type: Option<String>,
    pub port: Option<String>,
    pub tcp: Option<bool>,
    pub udp_payload_size: Option<u16>,
    pub timeout_ms: Option<u64>,
    pub validate_dnssec: Option<bool>,
    pub insecure_status: Option<i32>,
    pub validate_resolution: Option<bool>,
    pub unresolved_status: Option<i32>,
    pub report_dnssec: Option<bool>,
    pub report_response_time_on_failure: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}
