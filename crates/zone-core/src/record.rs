//! Declarative record types
//!
//! A [`DeclarativeRecord`] is what the caller wants a DNS name to resolve
//! to. Its invariants (non-empty name, at least one target) are checked
//! when it is built, including when it is deserialized.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// DNS record type
///
/// Types the provider recognizes but that are not listed here are kept
/// in [`RecordType::Other`].
///
/// Parsing trims the name and upper-cases it, so `"a"` and `"A"` are the
/// same type. Route53 only accepts upper-case type names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name
    Cname,
    /// Text
    Txt,
    /// Mail exchange
    Mx,
    /// Name server
    Ns,
    /// Pointer
    Ptr,
    /// Service locator
    Srv,
    /// Sender policy framework
    Spf,
    /// Certification authority authorization
    Caa,
    /// Naming authority pointer
    Naptr,
    /// Delegation signer
    Ds,
    /// Any other type, stored upper-cased
    Other(String),
}

impl RecordType {
    /// Wire name of the type (e.g. "CNAME")
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Srv => "SRV",
            Self::Spf => "SPF",
            Self::Caa => "CAA",
            Self::Naptr => "NAPTR",
            Self::Ds => "DS",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Ok(match upper.as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "TXT" => Self::Txt,
            "MX" => Self::Mx,
            "NS" => Self::Ns,
            "PTR" => Self::Ptr,
            "SRV" => Self::Srv,
            "SPF" => Self::Spf,
            "CAA" => Self::Caa,
            "NAPTR" => Self::Naptr,
            "DS" => Self::Ds,
            _ => Self::Other(upper),
        })
    }
}

impl From<String> for RecordType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(record_type) => record_type,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for RecordType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<RecordType> for String {
    fn from(record_type: RecordType) -> Self {
        record_type.as_str().to_string()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a DNS name should resolve to
///
/// # Example
///
/// ```rust
/// use zone_core::{DeclarativeRecord, RecordType};
///
/// let record = DeclarativeRecord::new(
///     "www.example.com",
///     RecordType::A,
///     vec!["lb.example.com".to_string()],
/// )?;
/// assert_eq!(record.primary_target(), "lb.example.com");
/// # Ok::<(), zone_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord", rename_all = "camelCase")]
pub struct DeclarativeRecord {
    name: String,
    record_type: RecordType,
    targets: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    name: String,
    record_type: RecordType,
    targets: Vec<String>,
}

impl TryFrom<RawRecord> for DeclarativeRecord {
    type Error = Error;

    fn try_from(raw: RawRecord) -> Result<Self> {
        Self::new(raw.name, raw.record_type, raw.targets)
    }
}

impl DeclarativeRecord {
    /// Build a record, rejecting an empty name or an empty target list
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<RecordType>,
        targets: Vec<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_record("record name cannot be empty"));
        }
        if targets.is_empty() {
            return Err(Error::invalid_record(format!(
                "record {} has no targets",
                name
            )));
        }

        Ok(Self {
            name,
            record_type: record_type.into(),
            targets,
        })
    }

    /// Fully-qualified record name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record type
    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    /// All targets, in the order they were given
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// The first target; the only one used when converting
    pub fn primary_target(&self) -> &str {
        // non-empty, checked in `new`
        &self.targets[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types_case_insensitively() {
        assert_eq!(RecordType::from("cname"), RecordType::Cname);
        assert_eq!(RecordType::from("Txt"), RecordType::Txt);
        assert_eq!(RecordType::from(" aaaa "), RecordType::Aaaa);
    }

    #[test]
    fn unknown_types_pass_through() {
        let record_type = RecordType::from("tlsa");
        assert_eq!(record_type, RecordType::Other("TLSA".to_string()));
        assert_eq!(record_type.to_string(), "TLSA");
    }

    #[test]
    fn rejects_empty_targets() {
        let err = DeclarativeRecord::new("www.example.com", RecordType::A, vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
    }

    #[test]
    fn rejects_empty_name() {
        let err = DeclarativeRecord::new("  ", RecordType::Txt, vec!["x".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
    }

    #[test]
    fn deserializes_through_validation() {
        let record: DeclarativeRecord = serde_json::from_str(
            r#"{"name":"txt.example.com","recordType":"TXT","targets":["v=spf1 -all"]}"#,
        )
        .unwrap();
        assert_eq!(record.record_type(), &RecordType::Txt);
        assert_eq!(record.primary_target(), "v=spf1 -all");

        let empty = serde_json::from_str::<DeclarativeRecord>(
            r#"{"name":"txt.example.com","recordType":"TXT","targets":[]}"#,
        );
        assert!(empty.is_err());
    }

    #[test]
    fn serializes_type_as_wire_name() {
        let record = DeclarativeRecord::new(
            "mail.example.com",
            RecordType::Mx,
            vec!["10 mx.example.com".to_string()],
        )
        .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["recordType"], "MX");
        assert_eq!(json["targets"][0], "10 mx.example.com");
    }
}
