use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::aggregation::counters::OrderedCounter;
use crate::aggregation::record::PortProtocolKey;
use crate::error::{FlowLogError, Result};

pub const DEFAULT_REPORT_PATH: &str = "./process_flowlog_op_file.txt";

/// Render both counters in report layout. Tags first, then port/protocol.
pub fn write_report<W: Write>(
    writer: &mut W,
    tag_counts: &OrderedCounter<String>,
    port_protocol_counts: &OrderedCounter<PortProtocolKey>,
) -> io::Result<()> {
    writeln!(writer, "Tag Counts:")?;
    writeln!(writer, "Tag,Count")?;
    for (tag, count) in tag_counts.iter() {
        writeln!(writer, "{},{}", tag, count)?;
    }
    writeln!(writer)?;

    writeln!(writer, "Port/Protocol Combination Counts:")?;
    writeln!(writer, "Port,Protocol,Count")?;
    for (key, count) in port_protocol_counts.iter() {
        writeln!(writer, "{},{}", key, count)?;
    }
    Ok(())
}

/// Truncate (or create) `path` and write the report into it.
pub fn save_report(
    path: &Path,
    tag_counts: &OrderedCounter<String>,
    port_protocol_counts: &OrderedCounter<PortProtocolKey>,
) -> Result<()> {
    let to_error = |source| FlowLogError::OutputWriteError {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, tag_counts, port_protocol_counts).map_err(to_error)?;
    writer.flush().map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(
        tags: &OrderedCounter<String>,
        ports: &OrderedCounter<PortProtocolKey>,
    ) -> String {
        let mut buffer = Vec::new();
        write_report(&mut buffer, tags, ports).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_report_layout() {
        let mut tags = OrderedCounter::new();
        tags.increment("sv_P2".to_string());
        tags.increment("email".to_string());
        tags.increment("sv_P2".to_string());

        let mut ports = OrderedCounter::new();
        ports.increment(PortProtocolKey::new("443", "tcp"));
        ports.increment(PortProtocolKey::new("25", "tcp"));
        ports.increment(PortProtocolKey::new("443", "tcp"));

        let expected = "Tag Counts:\n\
                        Tag,Count\n\
                        sv_P2,2\n\
                        email,1\n\
                        \n\
                        Port/Protocol Combination Counts:\n\
                        Port,Protocol,Count\n\
                        443,tcp,2\n\
                        25,tcp,1\n";
        assert_eq!(render(&tags, &ports), expected);
    }

    #[test]
    fn test_empty_report_keeps_headers() {
        let output = render(&OrderedCounter::new(), &OrderedCounter::new());
        assert_eq!(
            output,
            "Tag Counts:\nTag,Count\n\nPort/Protocol Combination Counts:\nPort,Protocol,Count\n"
        );
    }

    #[test]
    fn test_save_report_to_missing_directory_fails() {
        let result = save_report(
            Path::new("/nonexistent/dir/report.txt"),
            &OrderedCounter::new(),
            &OrderedCounter::new(),
        );
        assert!(matches!(result, Err(FlowLogError::OutputWriteError { .. })));
    }
}
