use dns_check_domain::dns_protocol::join_host_port;
use dns_check_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Resolves a configured server (IP literal or hostname) to the address the
/// query is sent to. IP literals skip the lookup; hostnames use the system
/// resolver and the first address returned wins.
pub async fn resolve_server(
    server: &str,
    port: u16,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    let bare = server
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(server);
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port));
    }

    let target = join_host_port(server, port);

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: target.clone(),
        })?
        .map_err(|e| DomainError::UnresolvableServer(format!("{}: {}", target, e)))?;

    addrs
        .next()
        .ok_or_else(|| DomainError::UnresolvableServer(format!("{}: no addresses", target)))
}
