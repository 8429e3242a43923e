pub mod aggregator;
pub mod counters;
pub mod record;
pub mod report;

pub use aggregator::{AggregatorState, FlowAggregator, RunSummary};
pub use counters::OrderedCounter;
pub use record::{parse_flow_line, PortProtocolKey, RecordIssue, MIN_FLOW_FIELDS};
pub use report::{save_report, write_report, DEFAULT_REPORT_PATH};
