use anyhow::Context;
use clap::Parser;
use flowlog_tagger::diagnostics::{init_logging, parse_level, LogTarget};
use flowlog_tagger::{settings::Config, LogDiagnostics};
use log::LevelFilter;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flowlog-tagger")]
#[command(about = "Tag flow log records by destination port/protocol and count them")]
struct Cli {
    #[arg(short, long, help = "Flow log file to process")]
    flow_log: Option<PathBuf>,

    #[arg(short, long, help = "Lookup table CSV (port,protocol,tag)")]
    lookup: Option<PathBuf>,

    #[arg(short, long, help = "Report output file")]
    output: Option<PathBuf>,

    #[arg(short, long, help = "Configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Log file path")]
    log_file: Option<PathBuf>,

    #[arg(long, help = "Write log lines to stderr instead of a log file")]
    stderr_log: bool,

    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,
}

/// Resolve the effective config and install the logger it asks for.
fn configure(cli: Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(flow_log) = cli.flow_log {
        config.input.flow_log = flow_log;
    }
    if let Some(lookup) = cli.lookup {
        config.input.lookup_table = lookup;
    }
    if let Some(output) = cli.output {
        config.output.report = output;
    }
    if let Some(log_file) = cli.log_file {
        config.logging.file = Some(log_file);
    }

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        parse_level(&config.logging.level)?
    };
    let target = match (&config.logging.file, cli.stderr_log) {
        (Some(path), false) => LogTarget::File(path.clone()),
        _ => LogTarget::Stderr,
    };
    init_logging(&target, level).context("Failed to initialise logging")?;

    Ok(config)
}

fn main() {
    let cli = Cli::parse();
    let diagnostics = LogDiagnostics::shared();

    let config = match configure(cli) {
        Ok(config) => config,
        Err(e) => {
            // The configured logger never came up; fall back to stderr.
            let _ = init_logging(&LogTarget::Stderr, LevelFilter::Error);
            diagnostics.critical(&format!("An error occurred: {:#}", e));
            process::exit(1);
        }
    };

    match flowlog_tagger::execute(&config, diagnostics) {
        Ok(summary) => {
            println!(
                "Processed {} lines ({} counted, {} tagged, {} malformed, {} unmapped). Report: {}",
                summary.lines_read,
                summary.records_counted,
                summary.tagged(),
                summary.malformed,
                summary.unmapped,
                config.output.report.display()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
