pub mod probes;

// Re-export use cases
pub use probes::{ProbeMetrics, ProbeReport, ProbeTarget, RunProbesUseCase};
