mod probes;

pub use probes::ProbeServices;
