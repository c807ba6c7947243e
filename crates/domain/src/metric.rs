//! Metric points exchanged between the probes and the exposition formatter.
//!
//! Tags are an ordered list rather than a map: keys may repeat and the
//! declaration order is the label order on output. Two keys are reserved and
//! describe the metric family instead of the point:
//!
//! * [`ANNOTATION_HELP`] carries the `# HELP` text
//! * [`ANNOTATION_TYPE`] carries the `# TYPE` value (`gauge` when absent)

use serde::{Deserialize, Serialize};

pub const ANNOTATION_HELP: &str = "__help__";
pub const ANNOTATION_TYPE: &str = "__type__";

pub const DEFAULT_METRIC_TYPE: &str = "gauge";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetricTag {
    pub name: String,
    pub value: String,
}

impl MetricTag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn is_annotation(&self) -> bool {
        self.name == ANNOTATION_HELP || self.name == ANNOTATION_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MetricPoint {
    pub name: String,
    pub value: f64,
    pub timestamp_nanos: i64,
    pub tags: Vec<MetricTag>,
}

impl MetricPoint {
    pub fn new(name: impl Into<String>, value: f64, timestamp_nanos: i64) -> Self {
        Self {
            name: name.into(),
            value,
            timestamp_nanos,
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(MetricTag::new(name, value));
        self
    }

    pub fn with_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = MetricTag>,
    {
        self.tags.extend(tags);
        self
    }

    pub fn with_help(self, help: impl Into<String>) -> Self {
        self.with_tag(ANNOTATION_HELP, help)
    }

    pub fn with_type(self, metric_type: impl Into<String>) -> Self {
        self.with_tag(ANNOTATION_TYPE, metric_type)
    }

    /// First `__help__` value, if any.
    pub fn help(&self) -> Option<&str> {
        self.annotation(ANNOTATION_HELP)
    }

    /// First `__type__` value, if any.
    pub fn metric_type(&self) -> Option<&str> {
        self.annotation(ANNOTATION_TYPE)
    }

    /// Tags that become labels, in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &MetricTag> {
        self.tags.iter().filter(|tag| !tag.is_annotation())
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_nanos / 1_000_000
    }

    fn annotation(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.name == key)
            .map(|tag| tag.value.as_str())
    }
}
