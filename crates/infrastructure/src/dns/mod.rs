pub mod forwarding;
pub mod probe_resolver;
pub mod transport;

pub use probe_resolver::ProbeResolver;
pub use transport::{create_transport, DnsTransport, Transport, TransportResponse};
