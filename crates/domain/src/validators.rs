/// Longest domain name in wire form, length octets included (RFC 1035 §2.3.4).
const MAX_NAME_WIRE_LEN: usize = 255;
const MAX_LABEL_LEN: usize = 63;

/// Syntactic check of a presentation-format domain name.
///
/// Accepts an optional trailing dot and the root name `.` on its own.
/// Rejects empty labels, labels over 63 octets, names over 255 octets in
/// wire form, and whitespace or control characters.
pub fn validate_domain_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("domain name cannot be empty".to_string());
    }
    if name == "." {
        return Ok(());
    }

    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() {
        return Err(format!("{name}: empty label"));
    }

    // One length octet per label plus the root label.
    let mut wire_len = 1;
    for label in trimmed.split('.') {
        if label.is_empty() {
            return Err(format!("{name}: empty label"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(format!(
                "{name}: label '{label}' exceeds {MAX_LABEL_LEN} octets"
            ));
        }
        if label.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(format!("{name}: label '{label}' contains whitespace"));
        }
        wire_len += label.len() + 1;
    }

    if wire_len > MAX_NAME_WIRE_LEN {
        return Err(format!("{name}: exceeds {MAX_NAME_WIRE_LEN} octets"));
    }

    Ok(())
}

/// Splits a comma-delimited list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a port given as text. Zero, negative and non-numeric values fail.
pub fn parse_port(raw: &str) -> Result<u16, String> {
    let port: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("port must be numeric: {raw}"))?;
    if port < 1 || port > u16::MAX as i64 {
        return Err(format!("invalid port number: {raw}"));
    }
    Ok(port as u16)
}
