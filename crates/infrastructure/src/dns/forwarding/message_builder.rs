//! DNS Message Builder
//!
//! Serializes the question with `hickory-proto`, then stamps the DNSSEC bits
//! directly on the wire: the AD flag in the header (RFC 6840 §5.7) and an
//! EDNS0 OPT pseudo-record with the DO flag (RFC 3225) in the additional
//! section.

use super::record_type_map::RecordTypeMapper;
use dns_check_domain::query_spec::fqdn;
use dns_check_domain::{DomainError, QuerySpec};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

pub const HEADER_LEN: usize = 12;

/// AD bit in the fourth header octet.
pub const AD_FLAG: u8 = 0x20;

/// DO bit in the high octet of the OPT TTL flags.
pub const DO_FLAG: u8 = 0x80;

const OPT_RECORD_LEN: usize = 11;
const TYPE_OPT: u16 = 41;

/// A serialized query and the ID its response must echo.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub id: u16,
    pub bytes: Vec<u8>,
}

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query for `domain` with the class, type and EDNS
    /// settings of `query_spec`.
    ///
    /// The domain is made fully qualified, the ID is random and RD is set.
    /// When `query_spec.request_dnssec` is set, AD is raised and an OPT record
    /// advertising `query_spec.udp_payload_size` with DO is appended.
    pub fn build_query(domain: &str, query_spec: &QuerySpec) -> Result<BuiltQuery, DomainError> {
        let name = Name::from_str(&fqdn(domain)).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(&query_spec.record_type));
        query.set_query_class(RecordTypeMapper::class_to_hickory(&query_spec.record_class));

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let mut bytes = Self::serialize_message(&message)?;

        if query_spec.request_dnssec {
            set_authentic_data(&mut bytes)?;
            append_opt_record(&mut bytes, query_spec.udp_payload_size, true)?;
        }

        Ok(BuiltQuery { id, bytes })
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::QueryEncoding(e.to_string()))?;

        Ok(buf)
    }
}

fn set_authentic_data(bytes: &mut [u8]) -> Result<(), DomainError> {
    if bytes.len() < HEADER_LEN {
        return Err(DomainError::QueryEncoding("message shorter than header".into()));
    }
    bytes[3] |= AD_FLAG;
    Ok(())
}

/// Appends a root-owned OPT record (RFC 6891 §6.1.2) and bumps ARCOUNT.
fn append_opt_record(
    bytes: &mut Vec<u8>,
    udp_payload_size: u16,
    dnssec_ok: bool,
) -> Result<(), DomainError> {
    if bytes.len() < HEADER_LEN {
        return Err(DomainError::QueryEncoding("message shorter than header".into()));
    }

    let arcount = u16::from_be_bytes([bytes[10], bytes[11]])
        .checked_add(1)
        .ok_or_else(|| DomainError::QueryEncoding("additional section is full".into()))?;
    bytes[10..12].copy_from_slice(&arcount.to_be_bytes());

    let [type_hi, type_lo] = TYPE_OPT.to_be_bytes();
    let [size_hi, size_lo] = udp_payload_size.to_be_bytes();
    let flags = if dnssec_ok { DO_FLAG } else { 0 };

    let opt: [u8; OPT_RECORD_LEN] = [
        0x00, // root owner
        type_hi, type_lo, // TYPE
        size_hi, size_lo, // CLASS = requestor's payload size
        0x00, // extended RCODE
        0x00, // version
        flags, 0x00, // DO + Z
        0x00, 0x00, // RDLEN
    ];
    bytes.extend_from_slice(&opt);

    Ok(())
}
