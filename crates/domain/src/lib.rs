//! dns-check Domain Layer
pub mod check_status;
pub mod config;
pub mod dns_protocol;
pub mod dns_record;
pub mod errors;
pub mod metric;
pub mod query_spec;
pub mod resolution;
pub mod validators;

pub use check_status::CheckStatus;
pub use config::{ChecksConfig, CliOverrides, ConfigError, LoggingConfig, ProbeConfig, ValidatedProbe};
pub use dns_protocol::TransportKind;
pub use dns_record::{RecordClass, RecordType};
pub use errors::DomainError;
pub use metric::{MetricPoint, MetricTag, ANNOTATION_HELP, ANNOTATION_TYPE};
pub use query_spec::QuerySpec;
pub use resolution::ResolutionOutcome;
