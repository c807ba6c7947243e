use dns_check_domain::{
    ChecksConfig, MetricPoint, MetricTag, QuerySpec, ResolutionOutcome, ANNOTATION_HELP,
};

pub const DNS_RESOLVED: &str = "dns_resolved";
pub const DNS_RESPONSE_TIME: &str = "dns_response_time";
pub const DNS_SECURE: &str = "dns_secure";

const RESOLVED_HELP: &str = "binary result 0 when the query can be resolved, otherwise 1";
const RESPONSE_TIME_HELP: &str = "round trip response time to resolve the query in seconds";
const SECURE_HELP: &str =
    "binary result 0 when the server indicates dnssec signatures were validated, otherwise 1";

/// One (domain, server) pair of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTarget {
    pub domain: String,
    pub server: String,
}

impl ProbeTarget {
    pub fn new(domain: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            server: server.into(),
        }
    }
}

/// Turns probe outcomes into metric points and exit-status contributions.
#[derive(Debug, Clone)]
pub struct ProbeMetrics {
    record_class: String,
    record_type: String,
    checks: ChecksConfig,
}

impl ProbeMetrics {
    pub fn new(query: &QuerySpec, checks: ChecksConfig) -> Self {
        Self {
            record_class: query.record_class.as_str().to_ascii_uppercase(),
            record_type: query.record_type.to_string(),
            checks,
        }
    }

    /// Points for one unit, in the order `dns_resolved`, `dns_response_time`,
    /// `dns_secure`. The response time is left out for unresolved units when
    /// `report_response_time_on_failure` is off, and `dns_secure` is left out
    /// when `report_dnssec` is off.
    pub fn points(
        &self,
        target: &ProbeTarget,
        outcome: &ResolutionOutcome,
        timestamp_nanos: i64,
    ) -> Vec<MetricPoint> {
        let mut points = Vec::with_capacity(3);

        points.push(
            MetricPoint::new(DNS_RESOLVED, flag(!outcome.resolved), timestamp_nanos)
                .with_tags(self.tags(RESOLVED_HELP, target)),
        );

        if outcome.resolved || self.checks.report_response_time_on_failure {
            points.push(
                MetricPoint::new(
                    DNS_RESPONSE_TIME,
                    outcome.round_trip_seconds(),
                    timestamp_nanos,
                )
                .with_tags(self.tags(RESPONSE_TIME_HELP, target)),
            );
        }

        if self.checks.report_dnssec {
            points.push(
                MetricPoint::new(DNS_SECURE, flag(!outcome.authenticated), timestamp_nanos)
                    .with_tags(self.tags(SECURE_HELP, target)),
            );
        }

        points
    }

    /// Highest status code raised by one unit, 0 when nothing is raised.
    pub fn status(&self, outcome: &ResolutionOutcome) -> i32 {
        let mut status = 0;
        if self.checks.validate_dnssec && !outcome.authenticated {
            status = status.max(self.checks.insecure_status);
        }
        if self.checks.validate_resolution && !outcome.resolved {
            status = status.max(self.checks.unresolved_status);
        }
        status
    }

    fn tags(&self, help: &str, target: &ProbeTarget) -> [MetricTag; 5] {
        [
            MetricTag::new(ANNOTATION_HELP, help),
            MetricTag::new("servername", target.server.as_str()),
            MetricTag::new("domain", target.domain.as_str()),
            MetricTag::new("record_class", self.record_class.as_str()),
            MetricTag::new("record_type", self.record_type.as_str()),
        ]
    }
}

// 0 is the healthy value for every binary probe metric.
fn flag(failed: bool) -> f64 {
    if failed {
        1.0
    } else {
        0.0
    }
}
