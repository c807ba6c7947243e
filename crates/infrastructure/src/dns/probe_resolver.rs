use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::{resolve_server, DnsTransport};
use async_trait::async_trait;
use dns_check_application::ports::DnsResolver;
use dns_check_domain::{DomainError, QuerySpec, ResolutionOutcome};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Sends one DNSSEC-aware query per call and reports what came back.
///
/// No retries and no fallback: a truncated UDP answer is judged on its
/// header alone. The reported round trip is the transport's write-to-read
/// time; a failed exchange reports how long the attempt ran, and the server
/// name lookup is never counted.
pub struct ProbeResolver {
    transport: Arc<dyn DnsTransport>,
    query: QuerySpec,
}

impl ProbeResolver {
    pub fn new(transport: Arc<dyn DnsTransport>, query: QuerySpec) -> Self {
        Self { transport, query }
    }
}

#[async_trait]
impl DnsResolver for ProbeResolver {
    async fn resolve(&self, domain: &str, server: &str) -> ResolutionOutcome {
        let built = match MessageBuilder::build_query(domain, &self.query) {
            Ok(built) => built,
            Err(e) => return ResolutionOutcome::failed(Duration::ZERO, e),
        };

        let server_addr = match resolve_server(server, self.query.port, self.query.timeout).await
        {
            Ok(addr) => addr,
            Err(e) => return ResolutionOutcome::failed(Duration::ZERO, e),
        };

        let start = Instant::now();
        let response = match self
            .transport
            .send(&built.bytes, server_addr, self.query.timeout)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!(domain = %domain, server = %server_addr, error = %e, "Exchange failed");
                return ResolutionOutcome::failed(start.elapsed(), e);
            }
        };
        let round_trip_time = response.round_trip_time;

        let parsed = match ResponseParser::parse(&response.bytes, built.id) {
            Ok(parsed) => parsed,
            Err(e) => return ResolutionOutcome::failed(round_trip_time, e),
        };

        if parsed.truncated {
            debug!(
                domain = %domain,
                server = %server_addr,
                protocol = response.protocol_used,
                "Truncated response, not retrying over TCP"
            );
        }

        debug!(
            domain = %domain,
            server = %server_addr,
            protocol = response.protocol_used,
            rcode = parsed.status(),
            authenticated = parsed.authenticated,
            rtt_us = round_trip_time.as_micros() as u64,
            "Probe exchange complete"
        );

        if parsed.is_resolved() {
            ResolutionOutcome::resolved(round_trip_time, parsed.authenticated)
        } else {
            ResolutionOutcome::unresolved(
                round_trip_time,
                parsed.authenticated,
                DomainError::Unresolved(parsed.status().to_string()),
            )
        }
    }
}
