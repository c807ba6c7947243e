use hickory_proto::rr::RecordType as WireType;
use std::fmt;
use std::str::FromStr;

/// A query type, held as its IANA wire code.
///
/// Mnemonics resolve through hickory first, then through the registered
/// types hickory does not name, then as the RFC 3597 `TYPEnnn` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordType(u16);

/// Registered mnemonics hickory may not parse. DNSSEC types are listed
/// because hickory gates some of them behind its DNSSEC features.
const REGISTERED: &[(&str, u16)] = &[
    ("MD", 3),
    ("MF", 4),
    ("MB", 7),
    ("MG", 8),
    ("MR", 9),
    ("WKS", 11),
    ("MINFO", 14),
    ("RP", 17),
    ("AFSDB", 18),
    ("X25", 19),
    ("ISDN", 20),
    ("RT", 21),
    ("NSAP", 22),
    ("NSAP-PTR", 23),
    ("SIG", 24),
    ("KEY", 25),
    ("PX", 26),
    ("GPOS", 27),
    ("LOC", 29),
    ("NXT", 30),
    ("EID", 31),
    ("NIMLOC", 32),
    ("ATMA", 34),
    ("KX", 36),
    ("CERT", 37),
    ("A6", 38),
    ("DNAME", 39),
    ("SINK", 40),
    ("APL", 42),
    ("DS", 43),
    ("IPSECKEY", 45),
    ("RRSIG", 46),
    ("NSEC", 47),
    ("DNSKEY", 48),
    ("DHCID", 49),
    ("NSEC3", 50),
    ("NSEC3PARAM", 51),
    ("SMIMEA", 53),
    ("HIP", 55),
    ("NINFO", 56),
    ("RKEY", 57),
    ("TALINK", 58),
    ("CDS", 59),
    ("CDNSKEY", 60),
    ("ZONEMD", 63),
    ("SPF", 99),
    ("UINFO", 100),
    ("UID", 101),
    ("GID", 102),
    ("UNSPEC", 103),
    ("NID", 104),
    ("L32", 105),
    ("L64", 106),
    ("LP", 107),
    ("EUI48", 108),
    ("EUI64", 109),
    ("TKEY", 249),
    ("MAILB", 253),
    ("MAILA", 254),
    ("URI", 256),
    ("AVC", 258),
    ("DOA", 259),
    ("AMTRELAY", 260),
    ("TA", 32768),
    ("DLV", 32769),
];

impl RecordType {
    pub const A: Self = Self(1);
    pub const NS: Self = Self(2);
    pub const CNAME: Self = Self(5);
    pub const SOA: Self = Self(6);
    pub const PTR: Self = Self(12);
    pub const MX: Self = Self(15);
    pub const TXT: Self = Self(16);
    pub const AAAA: Self = Self(28);
    pub const SRV: Self = Self(33);
    pub const DNAME: Self = Self(39);
    pub const DS: Self = Self(43);
    pub const RRSIG: Self = Self(46);
    pub const DNSKEY: Self = Self(48);
    pub const TLSA: Self = Self(52);
    pub const CDS: Self = Self(59);
    pub const HTTPS: Self = Self(65);
    pub const ANY: Self = Self(255);
    pub const CAA: Self = Self(257);

    pub const fn from_u16(code: u16) -> Self {
        Self(code)
    }

    pub const fn to_u16(&self) -> u16 {
        self.0
    }
}

fn registered_code(name: &str) -> Option<u16> {
    REGISTERED
        .iter()
        .find(|(mnemonic, _)| *mnemonic == name)
        .map(|(_, code)| *code)
}

fn generic_code(name: &str) -> Option<u16> {
    let digits = name.strip_prefix("TYPE")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) = REGISTERED.iter().find(|(_, code)| *code == self.0) {
            return f.write_str(name);
        }
        match WireType::from(self.0) {
            WireType::Unknown(code) => write!(f, "TYPE{}", code),
            wire => write!(f, "{}", wire),
        }
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_uppercase();

        if let Ok(wire) = WireType::from_str(&name) {
            if !matches!(wire, WireType::Unknown(_)) {
                return Ok(Self(u16::from(wire)));
            }
        }

        registered_code(&name)
            .or_else(|| generic_code(&name))
            .map(Self)
            .ok_or_else(|| format!("invalid record type: {}", s))
    }
}
