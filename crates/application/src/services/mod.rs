mod prometheus_formatter;

pub use prometheus_formatter::PrometheusFormatter;
