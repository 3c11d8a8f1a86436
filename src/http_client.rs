use reqwest::{Client, ClientBuilder};

use crate::config::RunConfig;
use crate::error::{Result, ScanError};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build the client shared by every probe of a run.
pub fn create_probe_client(config: &RunConfig) -> Result<Client> {
    ClientBuilder::new()
        // Timeouts: the total timeout bounds a hung target
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .tcp_nodelay(true) // Disable Nagle's algorithm for lower latency

        // TLS
        .use_rustls_tls()
        .tls_sni(true)
        .https_only(false)

        // Redirects
        .redirect(reqwest::redirect::Policy::limited(10))

        .user_agent(USER_AGENT)

        // Disable certificate validation for pentesting (ONLY for security research!)
        .danger_accept_invalid_certs(true)

        .build()
        .map_err(|e| ScanError::Client(e.to_string()))
}
