//! Prometheus text exposition (format version 0.0.4).
//!
//! Points are grouped into families by name. Families keep the order in which
//! their name was first seen and points keep their input order, so the output
//! is a pure function of the input sequence. HELP and TYPE come from the
//! first point of a family carrying the matching annotation tag.

use dns_check_domain::metric::DEFAULT_METRIC_TYPE;
use dns_check_domain::MetricPoint;
use std::collections::HashMap;
use std::fmt::Write;

struct Family<'a> {
    name: &'a str,
    help: Option<&'a str>,
    metric_type: Option<&'a str>,
    points: Vec<&'a MetricPoint>,
}

pub struct PrometheusFormatter;

impl PrometheusFormatter {
    /// Renders all points. Lines are joined with `\n`, without a trailing
    /// newline.
    pub fn render(points: &[MetricPoint]) -> String {
        let families = Self::group(points);

        let mut lines: Vec<String> = Vec::with_capacity(points.len() + families.len() * 2);
        for family in &families {
            if let Some(help) = family.help {
                lines.push(format!("# HELP {} {}", family.name, escape_help(help)));
            }
            lines.push(format!(
                "# TYPE {} {}",
                family.name,
                family.metric_type.unwrap_or(DEFAULT_METRIC_TYPE)
            ));
            for point in &family.points {
                lines.push(Self::render_point(point));
            }
        }

        lines.join("\n")
    }

    fn group(points: &[MetricPoint]) -> Vec<Family<'_>> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut families: Vec<Family<'_>> = Vec::new();

        for point in points {
            let slot = *index.entry(point.name.as_str()).or_insert_with(|| {
                families.push(Family {
                    name: point.name.as_str(),
                    help: None,
                    metric_type: None,
                    points: Vec::new(),
                });
                families.len() - 1
            });

            let family = &mut families[slot];
            if family.help.is_none() {
                family.help = point.help();
            }
            if family.metric_type.is_none() {
                family.metric_type = point.metric_type();
            }
            family.points.push(point);
        }

        families
    }

    fn render_point(point: &MetricPoint) -> String {
        let mut line = String::with_capacity(128);
        line.push_str(&point.name);

        let mut labels = point.labels().peekable();
        if labels.peek().is_some() {
            line.push('{');
            let mut separator = "";
            for tag in labels {
                let _ = write!(
                    line,
                    "{}{}=\"{}\"",
                    separator,
                    tag.name,
                    escape_label_value(&tag.value)
                );
                separator = ", ";
            }
            line.push('}');
        }

        let _ = write!(
            line,
            " {} {}",
            format_value(point.value),
            point.timestamp_millis()
        );
        line
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let inf = if value.is_sign_positive() { "+Inf" } else { "-Inf" };
        inf.to_string()
    } else {
        format!("{:.6}", value)
    }
}

fn escape_label_value(value: &str) -> String {
    if !value.contains(['\\', '"', '\n']) {
        return value.to_string();
    }
    let mut escaped = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}
