use anyhow::Context;
use clap::Parser;
use dns_check_application::services::PrometheusFormatter;
use dns_check_domain::validators::split_list;
use dns_check_domain::{CheckStatus, CliOverrides};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{error, info};

mod bootstrap;
mod di;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "dns-check")]
#[command(version)]
#[command(about = "DNS health probe with DNSSEC validation status, reported as Prometheus metrics")]
struct Cli {
    /// Comma delimited list of domains
    #[arg(short = 'd', long, env = "DOMAIN", value_name = "DOMAINS")]
    domain: Option<String>,

    /// Comma delimited list of DNS servers to query
    #[arg(short = 's', long, env = "SERVER", value_name = "SERVERS")]
    server: Option<String>,

    /// Record class to query [default: IN]
    #[arg(short = 'c', long, env = "CLASS")]
    class: Option<String>,

    /// Record type to query [default: A]
    #[arg(short = 't', long = "type", env = "TYPE")]
    record_type: Option<String>,

    /// DNS server port [default: 53]
    #[arg(short = 'p', long, env = "PORT")]
    port: Option<String>,

    /// Use TCP connections to servers instead of UDP
    #[arg(long, env = "TCP")]
    tcp: bool,

    /// Exit with unresolved-status if any domain entries are unresolved
    #[arg(long, env = "VALIDATE_RESOLUTION")]
    validate_resolution: bool,

    /// Exit status used when validate-resolution is set [default: 1]
    #[arg(long, env = "UNRESOLVED_STATUS")]
    unresolved_status: Option<i32>,

    /// Exit with insecure-status when a server did not validate DNSSEC signatures
    #[arg(long, env = "VALIDATE_DNSSEC")]
    validate_dnssec: bool,

    /// Exit status used when validate-dnssec is set [default: 1]
    #[arg(long, env = "INSECURE_STATUS")]
    insecure_status: Option<i32>,

    /// EDNS0 UDP payload size advertised in queries [default: 4096]
    #[arg(long, env = "UDP_PAYLOAD_SIZE")]
    udp_payload_size: Option<u16>,

    /// Per-exchange timeout in milliseconds [default: 2000]
    #[arg(long, env = "TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Do not emit the dns_secure metric
    #[arg(long)]
    no_dnssec_metric: bool,

    /// Emit dns_response_time only for resolved queries
    #[arg(long)]
    response_time_on_success_only: bool,

    /// Configuration file path
    #[arg(long, env = "DNS_CHECK_CONFIG", value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error) [default: warn]
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (text, json) [default: text]
    #[arg(long, env = "LOG_FORMAT")]
    log_format: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            domains: self.domain.as_deref().map(split_list),
            servers: self.server.as_deref().map(split_list),
            class: self.class.clone(),
            record_type: self.record_type.clone(),
            port: self.port.clone(),
            tcp: self.tcp.then_some(true),
            udp_payload_size: self.udp_payload_size,
            timeout_ms: self.timeout_ms,
            validate_dnssec: self.validate_dnssec.then_some(true),
            insecure_status: self.insecure_status,
            validate_resolution: self.validate_resolution.then_some(true),
            unresolved_status: self.unresolved_status,
            report_dnssec: self.no_dnssec_metric.then_some(false),
            report_response_time_on_failure: self.response_time_on_success_only.then_some(false),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let status = match run(&cli).await {
        Ok(status) => status,
        Err(e) => {
            error!(error = %e, "Check aborted");
            println!("error executing check: {:#}", e);
            CheckStatus::Unknown.code()
        }
    };

    ExitCode::from(status_byte(status))
}

async fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = match bootstrap::load_config(cli.config.as_deref(), cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            println!("error validating input: {}", e);
            return Ok(CheckStatus::Warning.code());
        }
    };

    bootstrap::init_logging(&config);

    let probe = match bootstrap::validate_config(&config, cli.config.as_deref()) {
        Ok(probe) => probe,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            println!("error validating input: {}", e);
            return Ok(CheckStatus::Warning.code());
        }
    };

    let services = di::ProbeServices::new(&probe);
    let report = services
        .run_probes
        .execute(&probe.domains, &probe.servers)
        .await;

    let exposition = PrometheusFormatter::render(&report.points);
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", exposition).context("writing exposition to stdout")?;
    stdout.flush().context("flushing stdout")?;

    info!(status = report.status, "Check finished");
    Ok(report.status)
}

/// Statuses outside 0..=255 cannot be reported by the OS and map to UNKNOWN.
fn status_byte(status: i32) -> u8 {
    u8::try_from(status).unwrap_or(CheckStatus::Unknown.code() as u8)
}
