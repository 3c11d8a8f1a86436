use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::classify::Verdict;
use crate::concurrent::{DispatchSummary, Dispatcher};
use crate::config::RunConfig;
use crate::error::{Result, ScanError};
use crate::http_client::create_probe_client;
use crate::utils::read_lines;

/// A fully loaded run: both lists in memory, configuration checked, client
/// built. Nothing has touched the network yet.
pub struct Scan {
    urls: Vec<String>,
    payloads: Vec<String>,
    dispatcher: Dispatcher,
}

impl Scan {
    /// Load both lists and validate the configuration. Any failure here is fatal
    /// and happens before the first request.
    pub fn prepare(urls_path: &Path, payloads_path: &Path, config: RunConfig) -> Result<Self> {
        let urls = read_lines(urls_path).map_err(|e| ScanError::config("URLs", urls_path, e))?;
        let payloads = read_lines(payloads_path).map_err(|e| ScanError::config("data", payloads_path, e))?;
        Self::from_lists(urls, payloads, config)
    }

    pub fn from_lists(urls: Vec<String>, payloads: Vec<String>, config: RunConfig) -> Result<Self> {
        config.validate()?;
        let client = create_probe_client(&config)?;
        tracing::info!(urls = urls.len(), payloads = payloads.len(), "inputs loaded");
        Ok(Self { urls, payloads, dispatcher: Dispatcher::new(client, Arc::new(config)) })
    }

    pub fn planned(&self) -> usize {
        self.urls.len() * self.payloads.len()
    }

    pub fn config(&self) -> &RunConfig {
        self.dispatcher.config()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.dispatcher.cancellation_token()
    }

    pub async fn run(&self, tx: mpsc::Sender<Verdict>) -> DispatchSummary {
        self.dispatcher.run(&self.urls, &self.payloads, tx).await
    }

    pub async fn run_collect(&self) -> (DispatchSummary, Vec<Verdict>) {
        self.dispatcher.run_collect(&self.urls, &self.payloads).await
    }
}
