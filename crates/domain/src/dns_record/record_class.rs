use hickory_proto::rr::DNSClass;
use std::fmt;
use std::str::FromStr;

/// DNS query classes (RFC 1035 §3.2.4, RFC 2136 §2.3 for NONE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordClass {
    IN,
    CH,
    HS,
    NONE,
    ANY,
}

impl RecordClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordClass::IN => "IN",
            RecordClass::CH => "CH",
            RecordClass::HS => "HS",
            RecordClass::NONE => "NONE",
            RecordClass::ANY => "ANY",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordClass::IN => 1,
            RecordClass::CH => 3,
            RecordClass::HS => 4,
            RecordClass::NONE => 254,
            RecordClass::ANY => 255,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1 => Some(RecordClass::IN),
            3 => Some(RecordClass::CH),
            4 => Some(RecordClass::HS),
            254 => Some(RecordClass::NONE),
            255 => Some(RecordClass::ANY),
            _ => None,
        }
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid record class: {}", s);
        let name = s.trim().to_ascii_uppercase();

        let wire = match name.as_str() {
            "CHAOS" => DNSClass::CH,
            "HESIOD" => DNSClass::HS,
            other => DNSClass::from_str(other).map_err(|_| invalid())?,
        };

        match wire {
            DNSClass::IN => Ok(RecordClass::IN),
            DNSClass::CH => Ok(RecordClass::CH),
            DNSClass::HS => Ok(RecordClass::HS),
            DNSClass::NONE => Ok(RecordClass::NONE),
            DNSClass::ANY => Ok(RecordClass::ANY),
            _ => Err(invalid()),
        }
    }
}
