use crate::aggregation::{FlowAggregator, RunSummary};
use crate::config::Config;
use crate::diagnostics::SharedDiagnostics;
use crate::error::Result;
use crate::lookup::LookupTable;

/// Load the lookup table, aggregate the flow log and write the report.
pub fn run(config: &Config, diagnostics: SharedDiagnostics) -> Result<RunSummary> {
    let lookup = LookupTable::load(&config.input.lookup_table, diagnostics.as_ref())?;
    let mut aggregator = FlowAggregator::new(&config.input.flow_log, lookup, diagnostics)
        .with_report_path(&config.output.report);
    aggregator.process()
}

/// [`run`] for the process entry point: a failure is also recorded at
/// critical severity before it is handed back.
pub fn execute(config: &Config, diagnostics: SharedDiagnostics) -> Result<RunSummary> {
    run(config, diagnostics.clone()).map_err(|e| {
        diagnostics.critical(&format!("An error occurred: {}", e));
        e
    })
}
