use dns_check_application::use_cases::RunProbesUseCase;
use dns_check_domain::ValidatedProbe;
use dns_check_infrastructure::dns::{create_transport, ProbeResolver};
use std::sync::Arc;
use tracing::debug;

pub struct ProbeServices {
    pub run_probes: Arc<RunProbesUseCase>,
}

impl ProbeServices {
    pub fn new(probe: &ValidatedProbe) -> Self {
        let transport = create_transport(probe.query.transport, probe.query.udp_payload_size);
        debug!(
            protocol = probe.query.transport.protocol_name(),
            udp_payload_size = probe.query.udp_payload_size,
            "Transport created"
        );

        let resolver = Arc::new(ProbeResolver::new(Arc::new(transport), probe.query.clone()));

        Self {
            run_probes: Arc::new(RunProbesUseCase::new(
                resolver,
                &probe.query,
                probe.checks.clone(),
            )),
        }
    }
}
