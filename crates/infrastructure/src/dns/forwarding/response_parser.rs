use super::message_builder::{AD_FLAG, HEADER_LEN};
use dns_check_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use tracing::debug;

/// QR bit in the third header octet.
const QR_FLAG: u8 = 0x80;

#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub rcode: ResponseCode,

    /// AD bit: the server vouches that the answer was DNSSEC-validated.
    pub authenticated: bool,

    pub truncated: bool,

    pub answer_count: usize,
}

impl DnsResponse {
    pub fn is_resolved(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }

    pub fn status(&self) -> &'static str {
        ResponseParser::rcode_to_status(self.rcode)
    }
}

pub struct ResponseParser;

impl ResponseParser {
    /// Decode a response and check it answers the query with `expected_id`.
    pub fn parse(response_bytes: &[u8], expected_id: u16) -> Result<DnsResponse, DomainError> {
        if response_bytes.len() < HEADER_LEN {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response too short: {} bytes",
                response_bytes.len()
            )));
        }

        let id = u16::from_be_bytes([response_bytes[0], response_bytes[1]]);
        if id != expected_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "response ID {} does not match query ID {}",
                id, expected_id
            )));
        }

        if response_bytes[2] & QR_FLAG == 0 {
            return Err(DomainError::InvalidDnsResponse(
                "QR bit not set in response".into(),
            ));
        }

        let message = Message::from_vec(response_bytes)
            .map_err(|e| DomainError::InvalidDnsResponse(e.to_string()))?;

        let response = DnsResponse {
            rcode: message.response_code(),
            authenticated: response_bytes[3] & AD_FLAG != 0,
            truncated: message.truncated(),
            answer_count: message.answers().len(),
        };

        debug!(
            rcode = response.status(),
            authenticated = response.authenticated,
            truncated = response.truncated,
            answers = response.answer_count,
            "DNS response parsed"
        );

        Ok(response)
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::YXDomain => "YXDOMAIN",
            ResponseCode::NotAuth => "NOTAUTH",
            _ => "UNKNOWN",
        }
    }
}
