use crate::errors::DomainError;
use std::time::Duration;

/// Result of one query against one server.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionOutcome {
    pub round_trip_time: Duration,
    /// AD bit of the response; false when no response was received.
    pub authenticated: bool,
    pub resolved: bool,
    pub failure: Option<String>,
}

impl ResolutionOutcome {
    pub fn resolved(round_trip_time: Duration, authenticated: bool) -> Self {
        Self {
            round_trip_time,
            authenticated,
            resolved: true,
            failure: None,
        }
    }

    /// A response arrived but did not carry NOERROR.
    pub fn unresolved(round_trip_time: Duration, authenticated: bool, error: DomainError) -> Self {
        Self {
            round_trip_time,
            authenticated,
            resolved: false,
            failure: Some(error.to_string()),
        }
    }

    /// No usable response.
    pub fn failed(round_trip_time: Duration, error: DomainError) -> Self {
        Self {
            round_trip_time,
            authenticated: false,
            resolved: false,
            failure: Some(error.to_string()),
        }
    }

    pub fn round_trip_seconds(&self) -> f64 {
        self.round_trip_time.as_secs_f64()
    }
}
