use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::Cli;
use sleep_hunter::classify::Verdict;
use sleep_hunter::output::{format_summary, format_verdict, spawn_jsonl_writer};
use sleep_hunter::{RunConfig, Scan};

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    // Configure logging based on global flags.
    // Keep external crates (reqwest/hyper) at INFO to avoid flooding the CLI.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    let filter_str = format!("sleep_hunter={crate},reqwest=info,hyper=info,h2=info", crate = crate_level);
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .init();

    let config = build_config(&cli)?;
    if config.cookie.is_some() && !config.send_cookie {
        tracing::warn!("cookie given without --send-cookie; it is not attached to requests");
    }

    // Fails before any request if a list cannot be read
    let scan = Scan::prepare(Path::new(&cli.urls), Path::new(&cli.data), config)?;
    tracing::info!(
        planned = scan.planned(),
        min = scan.config().min_response_time,
        max = scan.config().max_response_time,
        concurrency = ?scan.config().concurrency,
        early_exit = scan.config().early_exit,
        "Starting scan"
    );

    let cancel = scan.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, no new probes will be launched (press Ctrl-C again to quit)");
            cancel.cancel();
            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(130);
            }
        }
    });

    let color = !cli.no_color;
    let (tx, mut rx) = tokio::sync::mpsc::channel::<Verdict>(1024);
    let (jsonl_tx, jsonl_handle) = match &cli.output {
        Some(path) => {
            let (jtx, jrx) = tokio::sync::mpsc::channel::<Verdict>(1024);
            (Some(jtx), Some(spawn_jsonl_writer(PathBuf::from(path), jrx)))
        }
        None => (None, None),
    };

    let printer = tokio::spawn(async move {
        while let Some(v) = rx.recv().await {
            if let Some(line) = format_verdict(&v, color) {
                println!("{}", line);
            }
            if let Some(jtx) = &jsonl_tx {
                let _ = jtx.send(v).await;
            }
        }
    });

    let started = Instant::now();
    let summary = scan.run(tx).await;
    printer.await?;
    if let Some(h) = jsonl_handle {
        h.await?;
    }

    // stdout carries verdict lines only
    eprintln!("{}", format_summary(&summary, started.elapsed()));
    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::from_json_file(Path::new(path))?,
        None => RunConfig::default(),
    };

    if cli.cookie.is_some() {
        config.cookie = cli.cookie.clone();
    }
    if let Some(max) = cli.max_response_time {
        config.max_response_time = max;
    }
    if let Some(min) = cli.min_response_time {
        config.min_response_time = min;
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }
    if cli.concurrency.is_some() {
        config.concurrency = cli.concurrency;
    }
    config.send_cookie |= cli.send_cookie;
    config.verbose |= cli.verbose;
    config.early_exit |= cli.early_exit;

    Ok(config)
}
