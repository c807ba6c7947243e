#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// How the mock server answers every query it receives.
#[derive(Debug, Clone, Copy)]
pub struct MockReply {
    pub rcode: u8,
    pub authenticated: bool,
    pub truncated: bool,
    pub wrong_id: bool,
    pub silent: bool,
    /// A SERVFAIL copy is sent first from a different port.
    pub stray_first: bool,
    pub delay: Duration,
}

impl MockReply {
    pub fn noerror() -> Self {
        Self {
            rcode: 0,
            authenticated: false,
            truncated: false,
            wrong_id: false,
            silent: false,
            stray_first: false,
            delay: Duration::ZERO,
        }
    }

    pub fn secure() -> Self {
        Self {
            authenticated: true,
            ..Self::noerror()
        }
    }

    pub fn rcode(rcode: u8) -> Self {
        Self {
            rcode,
            ..Self::noerror()
        }
    }

    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::noerror()
        }
    }

    pub fn with_authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    pub fn with_truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    pub fn with_wrong_id(mut self) -> Self {
        self.wrong_id = true;
        self
    }

    pub fn with_stray_first(mut self) -> Self {
        self.stray_first = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Loopback DNS server on an OS-assigned port, UDP or TCP.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<Mutex<Vec<Vec<u8>>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start_udp(reply: MockReply) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(Mutex::new(Vec::new()));
        let seen = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let query = buf[..len].to_vec();
                            seen.lock().unwrap().push(query.clone());
                            if reply.stray_first {
                                send_stray(&query, reply, peer).await;
                            }
                            if let Some(response) = build_mock_response(&query, reply) {
                                tokio::time::sleep(reply.delay).await;
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub async fn start_tcp(reply: MockReply) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let queries = Arc::new(Mutex::new(Vec::new()));
        let seen = queries.clone();

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let seen = seen.clone();
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                return;
                            }
                            seen.lock().unwrap().push(query.clone());
                            match build_mock_response(&query, reply) {
                                Some(response) => {
                                    tokio::time::sleep(reply.delay).await;
                                    let len = (response.len() as u16).to_be_bytes();
                                    let _ = stream.write_all(&len).await;
                                    let _ = stream.write_all(&response).await;
                                }
                                // Hold the connection open without answering.
                                None => {
                                    let mut sink = [0u8; 1];
                                    let _ = stream.read(&mut sink).await;
                                }
                            }
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Raw queries received so far.
    pub fn queries(&self) -> Vec<Vec<u8>> {
        self.queries.lock().unwrap().clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Offset just past the question section of a single-question message.
pub fn question_end(message: &[u8]) -> Option<usize> {
    let mut pos = 12;
    loop {
        let label_len = *message.get(pos)? as usize;
        pos += 1;
        if label_len == 0 {
            break;
        }
        pos += label_len;
    }
    let end = pos + 4;
    (end <= message.len()).then_some(end)
}

async fn send_stray(query: &[u8], reply: MockReply, peer: SocketAddr) {
    let stray = MockReply {
        rcode: 2,
        ..reply
    };
    let Some(response) = build_mock_response(query, stray) else {
        return;
    };
    if let Ok(other) = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await {
        let _ = other.send_to(&response, peer).await;
    }
}

fn build_mock_response(query: &[u8], reply: MockReply) -> Option<Vec<u8>> {
    if reply.silent || query.len() < 12 {
        return None;
    }
    let question_end = question_end(query)?;
    let answers: u8 = if reply.rcode == 0 { 1 } else { 0 };

    let mut response = Vec::with_capacity(512);

    if reply.wrong_id {
        response.extend_from_slice(&[query[0] ^ 0xFF, query[1] ^ 0xFF]);
    } else {
        response.extend_from_slice(&query[0..2]);
    }

    let tc: u8 = if reply.truncated { 0x02 } else { 0x00 };
    let ad: u8 = if reply.authenticated { 0x20 } else { 0x00 };
    // QR | RD | TC
    response.push(0x81 | tc);
    // RA | AD | RCODE
    response.push(0x80 | ad | (reply.rcode & 0x0F));

    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&[0x00, answers]);
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);

    response.extend_from_slice(&query[12..question_end]);

    if answers == 1 {
        response.extend_from_slice(&[
            0xc0, 0x0c, // pointer to QNAME
            0x00, 0x01, // A
            0x00, 0x01, // IN
            0x00, 0x00, 0x00, 0x3c, // TTL 60
            0x00, 0x04, // RDLEN
            93, 184, 216, 34,
        ]);
    }

    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> Vec<u8> {
        vec![
            0xab, 0xcd, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // header
            0x03, b'c', b'o', b'm', 0x00, // com.
            0x00, 0x01, 0x00, 0x01, // A IN
        ]
    }

    #[test]
    fn test_question_end() {
        assert_eq!(question_end(&query()), Some(21));
    }

    #[test]
    fn test_mock_response_builder() {
        let response = build_mock_response(&query(), MockReply::secure()).unwrap();
        assert_eq!(response[0..2], [0xab, 0xcd]);
        assert_eq!(response[3] & 0x20, 0x20);
        assert_eq!(response[3] & 0x0F, 0);
    }

    #[test]
    fn test_mock_nxdomain_has_no_answer() {
        let response = build_mock_response(&query(), MockReply::rcode(3)).unwrap();
        assert_eq!(response[3] & 0x0F, 3);
        assert_eq!(response[7], 0);
        assert_eq!(response.len(), 21);
    }
}
