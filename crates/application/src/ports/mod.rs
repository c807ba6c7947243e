mod dns_resolver;

pub use dns_resolver::DnsResolver;

// Re-export for convenience
pub use dns_check_domain::ResolutionOutcome;
