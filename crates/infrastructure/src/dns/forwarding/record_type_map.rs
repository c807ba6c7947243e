//! Mapping between the domain record types/classes and their `hickory_proto`
//! counterparts.

use dns_check_domain::{RecordClass, RecordType};
use hickory_proto::rr::{DNSClass, RecordType as HickoryRecordType};

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Wire codes are shared, so the conversion goes through the IANA number.
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    pub fn class_to_hickory(record_class: &RecordClass) -> DNSClass {
        match record_class {
            RecordClass::IN => DNSClass::IN,
            RecordClass::CH => DNSClass::CH,
            RecordClass::HS => DNSClass::HS,
            RecordClass::NONE => DNSClass::NONE,
            RecordClass::ANY => DNSClass::ANY,
        }
    }
}
