pub mod checks;
pub mod errors;
pub mod logging;
pub mod probe;
pub mod root;

pub use checks::ChecksConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use probe::ProbeSection;
pub use root::{CliOverrides, ProbeConfig, ValidatedProbe};
