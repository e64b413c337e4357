//! Caller-side network diagnostics.

use std::time::Duration;

use tracing::debug;

/// Services consulted for the caller's public address, in order.
const PUBLIC_IP_SERVICES: [&str; 2] =
    ["http://myexternalip.com/raw", "https://ipv4.icanhazip.com/"];

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Best-effort public IP discovery: first non-empty answer wins, `None`
/// when every service fails. Purely a diagnostic banner; the probing run
/// does not depend on it.
pub async fn find_public_ip() -> Option<String> {
    let client = reqwest::Client::builder().timeout(LOOKUP_TIMEOUT).build().ok()?;

    for service in PUBLIC_IP_SERVICES {
        match client.get(service).send().await {
            Ok(response) if response.status().is_success() => {
                if let Ok(body) = response.text().await {
                    let ip = body.trim().to_string();
                    if !ip.is_empty() {
                        return Some(ip);
                    }
                }
            }
            Ok(response) => debug!("{} answered {}", service, response.status()),
            Err(err) => debug!("{} failed: {}", service, err),
        }
    }

    None
}
