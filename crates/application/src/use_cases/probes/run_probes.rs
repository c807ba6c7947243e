use super::metrics::{ProbeMetrics, ProbeTarget};
use crate::ports::DnsResolver;
use chrono::Utc;
use dns_check_domain::{ChecksConfig, DomainError, MetricPoint, QuerySpec, ResolutionOutcome};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Everything one run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    pub points: Vec<MetricPoint>,
    /// Highest status raised by any unit, 0 when none was raised.
    pub status: i32,
    pub probes: usize,
    pub unresolved: usize,
    pub insecure: usize,
}

struct UnitResult {
    index: usize,
    target: ProbeTarget,
    outcome: ResolutionOutcome,
    timestamp_nanos: i64,
}

pub struct RunProbesUseCase {
    resolver: Arc<dyn DnsResolver>,
    metrics: ProbeMetrics,
}

impl RunProbesUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>, query: &QuerySpec, checks: ChecksConfig) -> Self {
        Self {
            resolver,
            metrics: ProbeMetrics::new(query, checks),
        }
    }

    /// Probes every (domain, server) pair concurrently and waits for all of
    /// them. Units are reported in domain-major order regardless of which
    /// finished first.
    pub async fn execute(&self, domains: &[String], servers: &[String]) -> ProbeReport {
        let total = domains.len() * servers.len();
        if total == 0 {
            return ProbeReport::default();
        }

        debug!(
            domains = domains.len(),
            servers = servers.len(),
            probes = total,
            "Dispatching probes"
        );

        let pairs = domains.iter().flat_map(|domain| {
            servers
                .iter()
                .map(move |server| ProbeTarget::new(domain.as_str(), server.as_str()))
        });

        let mut probes = FuturesUnordered::new();
        for (index, target) in pairs.enumerate() {
            let resolver = Arc::clone(&self.resolver);
            let task_target = target.clone();

            let handle = tokio::spawn(async move {
                let timestamp_nanos = now_nanos();
                let outcome = resolver
                    .resolve(&task_target.domain, &task_target.server)
                    .await;
                (outcome, timestamp_nanos)
            });

            probes.push(async move { (index, target, handle.await) });
        }

        let mut results: Vec<UnitResult> = Vec::with_capacity(total);
        while let Some((index, target, joined)) = probes.next().await {
            let (outcome, timestamp_nanos) = match joined {
                Ok(done) => done,
                Err(e) => {
                    warn!(domain = %target.domain, server = %target.server, error = %e, "Probe task panicked");
                    let outcome = ResolutionOutcome::failed(
                        Duration::ZERO,
                        DomainError::ProbeAborted(e.to_string()),
                    );
                    (outcome, now_nanos())
                }
            };

            if let Some(reason) = &outcome.failure {
                warn!(domain = %target.domain, server = %target.server, error = %reason, "Probe failed");
            }

            results.push(UnitResult {
                index,
                target,
                outcome,
                timestamp_nanos,
            });
        }

        results.sort_by_key(|unit| unit.index);
        let report = self.assemble(results);

        info!(
            probes = report.probes,
            unresolved = report.unresolved,
            insecure = report.insecure,
            status = report.status,
            "Probe run complete"
        );

        report
    }

    fn assemble(&self, results: Vec<UnitResult>) -> ProbeReport {
        let mut report = ProbeReport {
            points: Vec::with_capacity(results.len() * 3),
            probes: results.len(),
            ..ProbeReport::default()
        };

        for unit in &results {
            if !unit.outcome.resolved {
                report.unresolved += 1;
            }
            if !unit.outcome.authenticated {
                report.insecure += 1;
            }
            report.status = report.status.max(self.metrics.status(&unit.outcome));
            report.points.extend(
                self.metrics
                    .points(&unit.target, &unit.outcome, unit.timestamp_nanos),
            );
        }

        report
    }
}

fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
}
