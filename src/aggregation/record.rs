use std::fmt;

use crate::lookup::LookupKey;

/// A flow log line needs at least this many space-separated fields.
pub const MIN_FLOW_FIELDS: usize = 8;
pub const DST_PORT_FIELD: usize = 6;
pub const PROTOCOL_FIELD: usize = 7;

/// `(destination port, protocol)`, rendered as `"<port>,<protocol>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortProtocolKey {
    pub port: String,
    pub protocol: String,
}

impl PortProtocolKey {
    pub fn new(port: &str, protocol: &str) -> Self {
        Self {
            port: port.to_string(),
            protocol: protocol.to_string(),
        }
    }

    /// Re-derive the key in the lookup table's `port_protocol` form.
    pub fn lookup_key(&self) -> LookupKey {
        LookupKey::new(&self.port, &self.protocol)
    }
}

impl fmt::Display for PortProtocolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.port, self.protocol)
    }
}

/// Per-line problems that are reported and skipped, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIssue {
    /// Fewer than [`MIN_FLOW_FIELDS`] fields. Carries the trimmed line.
    MalformedRecord(String),
    /// Counted under port/protocol but no tag exists for it.
    UnmappedCombination(PortProtocolKey),
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIssue::MalformedRecord(line) => write!(f, "Invalid log line: {}", line),
            RecordIssue::UnmappedCombination(key) => write!(
                f,
                "{} combination does not have a corresponding tag in the lookup table.",
                key
            ),
        }
    }
}

/// Pull the destination port and protocol out of one flow log line.
///
/// The line is trimmed and split on single spaces, so runs of spaces produce
/// empty fields and shift positions, exactly as the log format expects.
pub fn parse_flow_line(line: &str) -> Result<PortProtocolKey, RecordIssue> {
    let trimmed = line.trim();
    let fields: Vec<&str> = trimmed.split(' ').collect();
    if fields.len() < MIN_FLOW_FIELDS {
        return Err(RecordIssue::MalformedRecord(trimmed.to_string()));
    }

    Ok(PortProtocolKey::new(
        fields[DST_PORT_FIELD],
        fields[PROTOCOL_FIELD],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extracts_fields_six_and_seven() {
        let line = "2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 443 49153 6 25 20000 1620140761 1620140821 ACCEPT OK\n";
        let key = parse_flow_line(line).unwrap();
        assert_eq!(key.port, "49153");
        assert_eq!(key.protocol, "6");
        assert_eq!(key.to_string(), "49153,6");
        assert_eq!(key.lookup_key().as_str(), "49153_6");
    }

    #[test]
    fn test_exactly_eight_fields_is_valid() {
        let key = parse_flow_line("a b c d e f 25 tcp").unwrap();
        assert_eq!(key, PortProtocolKey::new("25", "tcp"));
    }

    #[test]
    fn test_short_line_is_malformed() {
        let issue = parse_flow_line("  a b c d e  \n").unwrap_err();
        assert_eq!(issue, RecordIssue::MalformedRecord("a b c d e".to_string()));
        assert_eq!(issue.to_string(), "Invalid log line: a b c d e");
    }

    #[test]
    fn test_blank_line_is_malformed() {
        assert!(matches!(
            parse_flow_line(""),
            Err(RecordIssue::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_split_is_on_single_spaces() {
        // The doubled space yields an empty field, moving port/protocol right.
        let key = parse_flow_line("a b  c d e f 25 tcp").unwrap();
        assert_eq!(key, PortProtocolKey::new("f", "25"));
    }

    #[test]
    fn test_unmapped_message_names_combination() {
        let issue = RecordIssue::UnmappedCombination(PortProtocolKey::new("23", "tcp"));
        assert_eq!(
            issue.to_string(),
            "23,tcp combination does not have a corresponding tag in the lookup table."
        );
    }
}
