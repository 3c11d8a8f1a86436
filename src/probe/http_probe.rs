use std::time::Instant;
use reqwest::Client;

use crate::error::TransportError;
use crate::probe::request::ProbeRequest;

/// Status and latency of a probe whose response headers arrived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseTiming {
    pub elapsed_secs: f64,
    pub status: u16,
}

/// Result of one probe, consumed by the classifier straight away.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub target: String,
    pub result: Result<ResponseTiming, TransportError>,
}

impl ProbeOutcome {
    pub fn response(target: impl Into<String>, elapsed_secs: f64, status: u16) -> Self {
        Self { target: target.into(), result: Ok(ResponseTiming { elapsed_secs, status }) }
    }

    pub fn failed(target: impl Into<String>, error: TransportError) -> Self {
        Self { target: target.into(), result: Err(error) }
    }
}

/// Send one timed GET for `request`. Never retried; failures come back as
/// an error outcome instead of bubbling up.
///
/// The clock starts right before the request is issued and stops once the
/// response headers are in, so it covers connection setup and time to first
/// byte but not the body. The body is never read; dropping the response
/// hands the connection back.
pub async fn probe(client: &Client, request: &ProbeRequest, send_cookie: bool) -> ProbeOutcome {
    let target = request.target();

    let mut builder = client.get(target.as_str());
    if let Some(c) = request.cookie_header(send_cookie) {
        builder = builder.header(reqwest::header::COOKIE, c);
    }

    let start = Instant::now();
    let resp = builder.send().await;
    let elapsed_secs = start.elapsed().as_secs_f64();

    match resp {
        Ok(r) => {
            let status = r.status().as_u16();
            drop(r);
            tracing::debug!(url_index = request.url_index, payload_index = request.payload_index, url = %target, status, elapsed_secs, "probe finished");
            ProbeOutcome::response(target, elapsed_secs, status)
        }
        Err(e) => {
            let err = TransportError::from_error(&e);
            tracing::debug!(url_index = request.url_index, payload_index = request.payload_index, url = %target, error = %err, elapsed_secs, "probe failed");
            ProbeOutcome::failed(target, err)
        }
    }
}
