use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::aggregation::counters::OrderedCounter;
use crate::aggregation::record::{parse_flow_line, PortProtocolKey, RecordIssue};
use crate::aggregation::report::{save_report, DEFAULT_REPORT_PATH};
use crate::diagnostics::SharedDiagnostics;
use crate::error::{FlowLogError, Result};
use crate::lookup::LookupTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    Uninitialized,
    Processed,
}

/// Line tallies for one pass. `lines_read == records_counted + malformed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_read: u64,
    pub records_counted: u64,
    pub malformed: u64,
    pub unmapped: u64,
}

impl RunSummary {
    pub fn tagged(&self) -> u64 {
        self.records_counted - self.unmapped
    }
}

/// I/O failure while streaming, with how far the pass got.
#[derive(Debug)]
struct ReadFault {
    lines_read: u64,
    source: io::Error,
}

/// Streams one flow log, tags each record and writes the count report.
pub struct FlowAggregator {
    flow_log: PathBuf,
    report_path: PathBuf,
    lookup: LookupTable,
    diagnostics: SharedDiagnostics,
    port_protocol_counts: OrderedCounter<PortProtocolKey>,
    tag_counts: OrderedCounter<String>,
    state: AggregatorState,
}

impl FlowAggregator {
    pub fn new<P: Into<PathBuf>>(
        flow_log: P,
        lookup: LookupTable,
        diagnostics: SharedDiagnostics,
    ) -> Self {
        Self {
            flow_log: flow_log.into(),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            lookup,
            diagnostics,
            port_protocol_counts: OrderedCounter::new(),
            tag_counts: OrderedCounter::new(),
            state: AggregatorState::Uninitialized,
        }
    }

    pub fn with_report_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.report_path = path.into();
        self
    }

    /// Run the single pass over the flow log and write the report.
    ///
    /// Only one call per aggregator succeeds; later calls return
    /// [`FlowLogError::AlreadyProcessed`] and change nothing. If the log cannot
    /// be read to the end, no report is written.
    pub fn process(&mut self) -> Result<RunSummary> {
        if self.state == AggregatorState::Processed {
            return Err(FlowLogError::AlreadyProcessed);
        }

        let file = File::open(&self.flow_log).map_err(|source| {
            self.diagnostics.error(&format!(
                "Flow log file not found: {}: {}",
                self.flow_log.display(),
                source
            ));
            FlowLogError::FlowLogMissing {
                path: self.flow_log.clone(),
                source,
            }
        })?;

        // A failed earlier attempt may have left partial counts behind.
        self.port_protocol_counts = OrderedCounter::new();
        self.tag_counts = OrderedCounter::new();

        let summary = self.ingest(BufReader::new(file)).map_err(|fault| {
            let path = self.flow_log.clone();
            let source = fault.source;
            // Nothing read at all (e.g. a directory): the log is unreadable, not cut short.
            if fault.lines_read == 0 {
                self.diagnostics.error(&format!(
                    "Flow log file unreadable: {}: {}",
                    path.display(),
                    source
                ));
                FlowLogError::FlowLogMissing { path, source }
            } else {
                self.diagnostics.error(&format!(
                    "Failed reading flow log {} after {} lines: {}",
                    path.display(),
                    fault.lines_read,
                    source
                ));
                FlowLogError::FlowLogRead { path, source }
            }
        })?;

        if let Err(e) = save_report(
            &self.report_path,
            &self.tag_counts,
            &self.port_protocol_counts,
        ) {
            self.diagnostics
                .error(&format!("Error writing to output file: {}", e));
            return Err(e);
        }

        self.state = AggregatorState::Processed;
        self.diagnostics.info(&format!(
            "Processed {} lines from {}: {} counted, {} malformed, {} unmapped",
            summary.lines_read,
            self.flow_log.display(),
            summary.records_counted,
            summary.malformed,
            summary.unmapped
        ));
        Ok(summary)
    }

    /// Fold every line of `reader` into the counters. Does not write a report.
    fn ingest<R: BufRead>(&mut self, reader: R) -> std::result::Result<RunSummary, ReadFault> {
        let mut summary = RunSummary::default();

        for line in reader.lines() {
            let line = line.map_err(|source| ReadFault {
                lines_read: summary.lines_read,
                source,
            })?;
            summary.lines_read += 1;

            match self.record_line(&line) {
                Ok(()) => summary.records_counted += 1,
                Err(issue @ RecordIssue::MalformedRecord(_)) => {
                    summary.malformed += 1;
                    self.diagnostics.warn(&issue.to_string());
                }
                Err(issue @ RecordIssue::UnmappedCombination(_)) => {
                    summary.records_counted += 1;
                    summary.unmapped += 1;
                    self.diagnostics.warn(&issue.to_string());
                }
            }
        }

        Ok(summary)
    }

    fn record_line(&mut self, line: &str) -> std::result::Result<(), RecordIssue> {
        let key = parse_flow_line(line)?;
        self.port_protocol_counts.increment(key.clone());

        match self.lookup.get(&key.lookup_key()) {
            Some(tag) => {
                self.tag_counts.increment(tag.to_string());
                Ok(())
            }
            None => Err(RecordIssue::UnmappedCombination(key)),
        }
    }

    pub fn state(&self) -> AggregatorState {
        self.state
    }

    pub fn flow_log(&self) -> &Path {
        &self.flow_log
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    pub fn lookup(&self) -> &LookupTable {
        &self.lookup
    }

    pub fn port_protocol_counts(&self) -> &OrderedCounter<PortProtocolKey> {
        &self.port_protocol_counts
    }

    pub fn tag_counts(&self) -> &OrderedCounter<String> {
        &self.tag_counts
    }
}
