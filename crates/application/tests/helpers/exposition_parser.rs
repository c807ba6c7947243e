//! Minimal checker for the Prometheus text exposition format 0.0.4.
//!
//! Covers what the formatter emits: HELP and TYPE comments, samples with
//! optional quoted labels, a float value and an optional integer timestamp.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct ExpositionSample {
    pub name: String,
    pub labels: Vec<(String, String)>,
    pub value: f64,
    pub timestamp_millis: Option<i64>,
}

const METRIC_TYPES: [&str; 5] = ["counter", "gauge", "histogram", "summary", "untyped"];

pub fn parse_exposition(text: &str) -> Result<Vec<ExpositionSample>, String> {
    let mut samples = Vec::new();
    let mut typed: HashSet<String> = HashSet::new();
    let mut helped: HashSet<String> = HashSet::new();
    let mut sampled: HashSet<String> = HashSet::new();
    let mut current: Option<String> = None;

    for (number, line) in text.lines().enumerate() {
        let at = |msg: String| format!("line {}: {}", number + 1, msg);

        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("# HELP ") {
            let (name, _help) = rest.split_once(' ').unwrap_or((rest, ""));
            check_metric_name(name).map_err(at)?;
            if !helped.insert(name.to_string()) {
                return Err(at(format!("second HELP for {name}")));
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("# TYPE ") {
            let (name, kind) = rest
                .split_once(' ')
                .ok_or_else(|| at("TYPE without a type".to_string()))?;
            check_metric_name(name).map_err(at)?;
            if !METRIC_TYPES.contains(&kind) {
                return Err(at(format!("unknown metric type {kind}")));
            }
            if sampled.contains(name) {
                return Err(at(format!("TYPE for {name} after its samples")));
            }
            if !typed.insert(name.to_string()) {
                return Err(at(format!("second TYPE for {name}")));
            }
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        let sample = parse_sample(line).map_err(at)?;
        if current.as_deref() != Some(sample.name.as_str()) {
            if sampled.contains(&sample.name) {
                return Err(at(format!("samples of {} are not contiguous", sample.name)));
            }
            current = Some(sample.name.clone());
        }
        sampled.insert(sample.name.clone());
        samples.push(sample);
    }

    Ok(samples)
}

fn parse_sample(line: &str) -> Result<ExpositionSample, String> {
    let name_end = line
        .find(|c: char| c == '{' || c == ' ')
        .ok_or_else(|| format!("sample without value: {line}"))?;
    let name = &line[..name_end];
    check_metric_name(name)?;

    let mut rest = &line[name_end..];
    let mut labels = Vec::new();
    if let Some(body) = rest.strip_prefix('{') {
        let (parsed, after) = parse_labels(body)?;
        labels = parsed;
        rest = after;
    }

    let rest = rest
        .strip_prefix(' ')
        .ok_or_else(|| format!("missing space before value: {line}"))?;
    let mut fields = rest.split(' ');
    let value = parse_value(fields.next().unwrap_or_default())?;
    let timestamp_millis = match fields.next() {
        Some(ts) => Some(
            ts.parse::<i64>()
                .map_err(|_| format!("invalid timestamp {ts}"))?,
        ),
        None => None,
    };
    if fields.next().is_some() {
        return Err(format!("trailing fields: {line}"));
    }

    Ok(ExpositionSample {
        name: name.to_string(),
        labels,
        value,
        timestamp_millis,
    })
}

#[allow(clippy::type_complexity)]
fn parse_labels(body: &str) -> Result<(Vec<(String, String)>, &str), String> {
    let mut labels = Vec::new();
    let mut rest = body;

    loop {
        rest = rest.trim_start_matches(' ');
        if let Some(after) = rest.strip_prefix('}') {
            return Ok((labels, after));
        }

        let eq = rest
            .find('=')
            .ok_or_else(|| format!("label without '=': {rest}"))?;
        let name = &rest[..eq];
        check_label_name(name)?;
        rest = rest[eq + 1..]
            .strip_prefix('"')
            .ok_or_else(|| format!("label {name} value is not quoted"))?;

        let mut value = String::new();
        let mut chars = rest.char_indices();
        let close = loop {
            match chars.next() {
                Some((_, '\\')) => match chars.next() {
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, '"')) => value.push('"'),
                    Some((_, 'n')) => value.push('\n'),
                    other => return Err(format!("bad escape in label {name}: {other:?}")),
                },
                Some((i, '"')) => break i,
                Some((_, '\n')) => return Err(format!("raw newline in label {name}")),
                Some((_, c)) => value.push(c),
                None => return Err(format!("unterminated label {name}")),
            }
        };
        labels.push((name.to_string(), value));
        rest = &rest[close + 1..];

        if let Some(after) = rest.strip_prefix(',') {
            rest = after;
        } else if !rest.starts_with('}') {
            return Err(format!("expected ',' or '}}' after label {name}"));
        }
    }
}

fn parse_value(raw: &str) -> Result<f64, String> {
    match raw {
        "NaN" => Ok(f64::NAN),
        "+Inf" => Ok(f64::INFINITY),
        "-Inf" => Ok(f64::NEG_INFINITY),
        _ => raw.parse().map_err(|_| format!("invalid value {raw}")),
    }
}

fn check_metric_name(name: &str) -> Result<(), String> {
    check_identifier(name, true).map_err(|_| format!("invalid metric name {name:?}"))
}

fn check_label_name(name: &str) -> Result<(), String> {
    check_identifier(name, false).map_err(|_| format!("invalid label name {name:?}"))
}

fn check_identifier(name: &str, allow_colon: bool) -> Result<(), ()> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(())?;
    let head_ok = first.is_ascii_alphabetic() || first == '_' || (allow_colon && first == ':');
    let tail_ok =
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || (allow_colon && c == ':'));
    if head_ok && tail_ok {
        Ok(())
    } else {
        Err(())
    }
}
