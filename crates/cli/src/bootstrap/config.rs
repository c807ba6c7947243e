use dns_check_domain::{CliOverrides, ConfigError, ProbeConfig, ValidatedProbe};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> Result<ProbeConfig, ConfigError> {
    ProbeConfig::load(config_path, cli_overrides)
}

pub fn validate_config(
    config: &ProbeConfig,
    config_path: Option<&str>,
) -> Result<ValidatedProbe, ConfigError> {
    let validated = config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        domains = validated.domains.len(),
        servers = validated.servers.len(),
        class = %validated.query.record_class,
        record_type = %validated.query.record_type,
        port = validated.query.port,
        transport = %validated.query.transport,
        timeout_ms = validated.query.timeout.as_millis() as u64,
        "Configuration loaded"
    );

    Ok(validated)
}
