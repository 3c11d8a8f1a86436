use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::classify::Verdict;

/// Spawn a background task that appends every received verdict as one JSON
/// object per line to `path`. The task ends when all senders are dropped.
pub fn spawn_jsonl_writer(path: PathBuf, mut rx: mpsc::Receiver<Verdict>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut f = match OpenOptions::new().create(true).append(true).open(&path).await {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "failed to open jsonl output file");
                // keep draining so senders never block on a dead writer
                while rx.recv().await.is_some() {}
                return;
            }
        };
        while let Some(v) = rx.recv().await {
            match serde_json::to_vec(&v) {
                Ok(mut line) => {
                    line.push(b'\n');
                    if let Err(e) = f.write_all(&line).await {
                        tracing::error!(error = %e, "failed to write jsonl line");
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize verdict");
                }
            }
        }
        if let Err(e) = f.flush().await {
            tracing::error!(error = %e, "failed to flush jsonl writer");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::config::RunConfig;
    use crate::probe::ProbeOutcome;

    #[tokio::test]
    async fn test_writes_one_line_per_verdict() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verdicts.jsonl");
        let (tx, rx) = mpsc::channel(8);
        let handle = spawn_jsonl_writer(path.clone(), rx);

        let cfg = RunConfig::default();
        tx.send(classify(&ProbeOutcome::response("http://t/a", 21.0, 200), &cfg)).await.unwrap();
        tx.send(classify(&ProbeOutcome::response("http://t/b", 1.0, 404), &cfg)).await.unwrap();
        drop(tx);
        handle.await.unwrap();

        let data = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = data.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["vulnerable"], true);
        assert_eq!(lines[0]["level"], "alert");
        assert_eq!(lines[1]["level"], "silent");
        assert_eq!(lines[1]["status"], 404);
    }
}
