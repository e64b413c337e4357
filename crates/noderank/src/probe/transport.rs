//! Transport-level probe: timed TCP connect plus a minimal request.

use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::{Probe, ProbeReading, duration_ms};
use crate::error::ProbeError;

/// Fixed request payload written after connecting. `Connection: close`
/// bounds the full response at EOF.
const REQUEST_PAYLOAD: &[u8] =
    b"GET /v1/chain/get_info HTTP/1.1\r\nHost: noderank\r\nConnection: close\r\n\r\n";

/// Timed TCP connect/request probe.
///
/// Records time-to-first-byte and time-to-full-response. Diagnostic: its
/// readings are logged but never ranked.
pub struct TransportProbe {
    timeout: Duration,
}

impl TransportProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait::async_trait]
impl Probe for TransportProbe {
    async fn measure(&self, target: &str) -> Result<ProbeReading, ProbeError> {
        let start = Instant::now();

        let exchange = timeout(self.timeout, async {
            let mut stream = TcpStream::connect(target).await?;
            let remote = stream.peer_addr()?;
            stream.write_all(REQUEST_PAYLOAD).await?;

            let mut first_byte = None;
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).await?;
                if n == 0 {
                    break;
                }
                if first_byte.is_none() {
                    first_byte = Some(start.elapsed());
                }
            }

            Ok::<_, std::io::Error>((first_byte, start.elapsed(), remote))
        })
        .await;

        match exchange {
            Ok(Ok((first_byte, total, remote))) => {
                // With no response bytes at all, first byte degenerates
                // to the close timing.
                let canonical = first_byte.unwrap_or(total);
                Ok(ProbeReading::new(duration_ms(canonical))
                    .with_total(duration_ms(total))
                    .with_remote_addr(remote.ip()))
            }
            Ok(Err(err)) => Err(ProbeError::Connect { reason: err.to_string() }),
            Err(_) => Err(ProbeError::Timeout { limit: self.timeout }),
        }
    }
}
