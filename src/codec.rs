//! Wire format for the control protocol.
//!
//! Commands are single plain-text lines; responses are free text in which
//! each line carries a leading numeric status code. `225` acknowledges a
//! login and `151` prefixes one record in a `LISTRR` listing. Every other
//! code is ignored. There is no length framing and no escaping, so values
//! containing spaces or colons do not round-trip; that is a property of the
//! server's grammar, not something this codec can repair.

use tracing::trace;

use crate::rr::{Record, TimeToLive};

/// Status code acknowledging a successful `LOGIN`.
pub(crate) const LOGIN_OK: &str = "225";

/// Status code prefixing one record line in a `LISTRR` response.
const RECORD_ENTRY: &str = "151";

/// Whether an `ADDRR` value carries a `:<ttl>` suffix.
///
/// Appends always send the suffix. Overwrites send it only for `SRV`
/// records; the server's update grammar takes a bare value for the other
/// types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TtlSuffix {
    Always,
    SrvOnly,
}

pub(crate) fn login(username: &str, password: &str) -> String {
    format!("LOGIN {username} {password}")
}

pub(crate) fn list(zone: &str) -> String {
    format!("LISTRR {zone}")
}

pub(crate) fn add(record: &Record, suffix: TtlSuffix) -> String {
    match suffix {
        TtlSuffix::SrvOnly if record.rtype != "SRV" => {
            format!("ADDRR {} {} {}", record.name, record.rtype, record.value)
        }
        TtlSuffix::Always | TtlSuffix::SrvOnly => format!(
            "ADDRR {} {} {}:{}",
            record.name, record.rtype, record.value, record.ttl
        ),
    }
}

pub(crate) fn delete(record: &Record) -> String {
    format!("DELRR {} {} {}", record.name, record.rtype, record.value)
}

/// Parses a `LISTRR` response into records, preserving line order.
///
/// Lines that do not start with `151`, or that tokenize to fewer than three
/// fields after the status prefix, are skipped without error, so an empty or
/// all-status response yields an empty vector.
pub(crate) fn parse_listing(response: &str) -> Vec<Record> {
    let records: Vec<Record> = response.lines().filter_map(parse_entry).collect();
    trace!(records = records.len(), "parsed listing");
    records
}

fn parse_entry(line: &str) -> Option<Record> {
    if !line.starts_with(RECORD_ENTRY) {
        return None;
    }

    // Strip the status code and its separator.
    let fields: Vec<&str> = line.get(4..)?.split_whitespace().collect();
    if fields.len() < 3 {
        return None;
    }

    let name = fields[0];
    let rtype = fields[1];

    // The value and TTL ride together in the last field as `value[:ttl]`.
    let (mut value, mut ttl) = split_value_ttl(fields[fields.len() - 1]);

    if rtype == "MX" && fields.len() == 4 {
        // MX lines carry the priority as their own field.
        value = fields[2].to_owned();
    } else if rtype == "SRV" && fields.len() >= 6 {
        // SRV lines spread priority, weight, port and target over four
        // fields; a seventh field, when present, re-states `value:ttl`.
        value = fields[2..6].join(" ");
        if fields.len() == 7 {
            ttl = split_value_ttl(fields[6]).1;
        }
    }

    Some(Record {
        name: name.to_owned(),
        rtype: rtype.to_owned(),
        value,
        ttl,
    })
}

/// Splits a `value[:ttl]` field. The TTL defaults to zero when the suffix is
/// absent or not numeric.
fn split_value_ttl(field: &str) -> (String, TimeToLive) {
    let mut parts = field.split(':');
    let value = parts.next().unwrap_or_default().to_owned();
    let ttl = parts
        .next()
        .and_then(|secs| secs.parse().ok())
        .map(TimeToLive::from_secs)
        .unwrap_or(TimeToLive::ZERO);
    (value, ttl)
}
