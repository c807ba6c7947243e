mod metrics;
mod run_probes;

pub use metrics::{
    ProbeMetrics, ProbeTarget, DNS_RESOLVED, DNS_RESPONSE_TIME, DNS_SECURE,
};
pub use run_probes::{ProbeReport, RunProbesUseCase};
