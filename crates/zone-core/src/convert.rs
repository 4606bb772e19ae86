// # Record Converter
//
// Maps a declarative record onto the record set a zone provider stores.
//
// A and CNAME records always point at a managed endpoint (a load balancer)
// whose hosted zone owns the addresses, so they are bound as aliases. Every
// other type carries its first target as a literal value with a fixed TTL.
// Only the first target is ever used.

use serde::{Deserialize, Serialize};

use crate::config::ZoneContext;
use crate::record::{DeclarativeRecord, RecordType};

/// TTL, in seconds, given to literal records
pub const DEFAULT_TTL: u32 = 60;

/// Alias pointing at another managed resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTarget {
    /// DNS name of the aliased resource
    pub dns_name: String,
    /// Hosted zone owning `dns_name`
    pub hosted_zone_id: String,
}

/// How a record set resolves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordBinding {
    /// Resolves through another resource's record set
    Alias(AliasTarget),
    /// Resolves to a literal value
    Literal {
        /// Record value
        value: String,
        /// Time-to-live in seconds
        ttl: u32,
    },
}

/// Provider representation of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecordSet {
    /// Fully-qualified record name
    pub name: String,
    /// Record type
    pub record_type: RecordType,
    /// Alias or literal binding
    pub binding: RecordBinding,
}

impl ProviderRecordSet {
    /// The alias target, if the record is an alias
    pub fn alias(&self) -> Option<&AliasTarget> {
        match &self.binding {
            RecordBinding::Alias(target) => Some(target),
            RecordBinding::Literal { .. } => None,
        }
    }

    /// The literal value, if the record is not an alias
    pub fn value(&self) -> Option<&str> {
        match &self.binding {
            RecordBinding::Literal { value, .. } => Some(value),
            RecordBinding::Alias(_) => None,
        }
    }

    /// The TTL, if the record is not an alias
    pub fn ttl(&self) -> Option<u32> {
        match &self.binding {
            RecordBinding::Literal { ttl, .. } => Some(*ttl),
            RecordBinding::Alias(_) => None,
        }
    }
}

/// Whether records of this type are bound as aliases
///
/// Decided on the wire name, so `RecordType::Other("A")` binds like
/// `RecordType::A`.
pub fn is_alias_type(record_type: &RecordType) -> bool {
    matches!(record_type.as_str(), "A" | "CNAME")
}

/// Convert a declarative record into a provider record set
pub fn to_record_set(record: &DeclarativeRecord, context: &ZoneContext) -> ProviderRecordSet {
    let target = record.primary_target().to_string();

    let binding = if is_alias_type(record.record_type()) {
        RecordBinding::Alias(AliasTarget {
            dns_name: target,
            hosted_zone_id: context.alias_hosted_zone_id().to_string(),
        })
    } else {
        RecordBinding::Literal {
            value: target,
            ttl: DEFAULT_TTL,
        }
    };

    ProviderRecordSet {
        name: record.name().to_string(),
        record_type: record.record_type().clone(),
        binding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ZoneContext {
        ZoneContext::new("Z1", "Z123", "lb.example.com")
    }

    fn record(name: &str, record_type: RecordType, targets: &[&str]) -> DeclarativeRecord {
        DeclarativeRecord::new(
            name,
            record_type,
            targets.iter().map(|t| t.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn a_record_becomes_alias() {
        let set = to_record_set(
            &record("www.example.com", RecordType::A, &["lb.example.com"]),
            &context(),
        );

        assert_eq!(set.name, "www.example.com");
        assert_eq!(set.record_type, RecordType::A);
        assert_eq!(
            set.alias(),
            Some(&AliasTarget {
                dns_name: "lb.example.com".to_string(),
                hosted_zone_id: "Z123".to_string(),
            })
        );
        assert_eq!(set.ttl(), None);
        assert_eq!(set.value(), None);
    }

    #[test]
    fn cname_record_becomes_alias() {
        let set = to_record_set(
            &record("app.example.com", RecordType::Cname, &["lb.example.com"]),
            &context(),
        );

        assert!(set.alias().is_some());
        assert_eq!(set.ttl(), None);
    }

    #[test]
    fn txt_record_is_literal_with_default_ttl() {
        let set = to_record_set(
            &record("txt.example.com", RecordType::Txt, &["v=spf1 -all"]),
            &context(),
        );

        assert_eq!(set.value(), Some("v=spf1 -all"));
        assert_eq!(set.ttl(), Some(60));
        assert!(set.alias().is_none());
    }

    #[test]
    fn non_alias_types_are_literal() {
        for record_type in [
            RecordType::Aaaa,
            RecordType::Mx,
            RecordType::Ns,
            RecordType::Srv,
            RecordType::Caa,
            RecordType::Other("TLSA".to_string()),
        ] {
            let set = to_record_set(
                &record("x.example.com", record_type.clone(), &["value"]),
                &context(),
            );
            assert_eq!(set.value(), Some("value"), "{} should be literal", record_type);
            assert_eq!(set.ttl(), Some(DEFAULT_TTL));
            assert!(set.alias().is_none());
        }
    }

    #[test]
    fn alias_decision_follows_wire_name() {
        for record_type in [
            RecordType::Other("A".to_string()),
            RecordType::Other("CNAME".to_string()),
        ] {
            let set = to_record_set(
                &record("www.example.com", record_type.clone(), &["lb.example.com"]),
                &context(),
            );
            assert!(set.alias().is_some(), "{} should be an alias", record_type);
            assert_eq!(set.ttl(), None);
        }
    }

    #[test]
    fn lowercase_type_names_convert_like_upper_case() {
        let set = to_record_set(
            &record("www.example.com", RecordType::from("a"), &["lb.example.com"]),
            &context(),
        );
        assert_eq!(set.record_type, RecordType::A);
        assert!(set.alias().is_some());

        let set = to_record_set(
            &record("txt.example.com", RecordType::from("txt"), &["hello"]),
            &context(),
        );
        assert_eq!(set.record_type.as_str(), "TXT");
        assert_eq!(set.ttl(), Some(DEFAULT_TTL));
    }

    #[test]
    fn only_first_target_is_used() {
        let set = to_record_set(
            &record("txt.example.com", RecordType::Txt, &["first", "second"]),
            &context(),
        );
        assert_eq!(set.value(), Some("first"));

        let set = to_record_set(
            &record("www.example.com", RecordType::A, &["lb-a.example.com", "lb-b.example.com"]),
            &context(),
        );
        assert_eq!(set.alias().map(|a| a.dns_name.as_str()), Some("lb-a.example.com"));
    }

    #[test]
    fn conversion_is_deterministic() {
        let input = record("txt.example.com", RecordType::Txt, &["v=spf1 -all"]);
        let first = serde_json::to_vec(&to_record_set(&input, &context())).unwrap();

        for _ in 0..10 {
            let again = serde_json::to_vec(&to_record_set(&input, &context())).unwrap();
            assert_eq!(first, again);
        }
    }
}
