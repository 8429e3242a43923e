// Library exports for flowlog-tagger
pub mod aggregation;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod lookup;
pub mod pipeline;

pub use aggregation::{aggregator, counters, record, report};
pub use aggregation::{FlowAggregator, OrderedCounter, PortProtocolKey, RunSummary};
pub use config::settings;
pub use diagnostics::{Diagnostics, LogDiagnostics, MemoryDiagnostics, SharedDiagnostics};
pub use lookup::{LookupKey, LookupTable};
pub use pipeline::{execute, run};

// Error types
pub use error::{FlowLogError, Result};
