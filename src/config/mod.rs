pub mod settings;

pub use settings::{Config, InputConfig, LoggingConfig, OutputConfig};
