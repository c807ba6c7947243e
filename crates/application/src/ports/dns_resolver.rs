use async_trait::async_trait;
use dns_check_domain::ResolutionOutcome;

/// Issues one query for `domain` against `server`.
///
/// Implementations never fail: transport and protocol errors are folded into
/// the returned [`ResolutionOutcome`]. One attempt per call, no retries.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, domain: &str, server: &str) -> ResolutionOutcome;
}
