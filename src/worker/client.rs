//! Async client for the database worker process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, warn};

use super::error::{WorkerError, WorkerResult};
use super::protocol::{ErrorInfo, RequestEnvelope, ResponseEnvelope};
use crate::config::{expand_env_vars, WorkerSettings};

/// Name of the worker binary searched for when no path is configured.
const WORKER_BINARY: &str = "tap-redshift-worker";

type PendingMap = Arc<Mutex<HashMap<String, oneshot::Sender<ResponseEnvelope>>>>;

/// Async client for the database worker.
///
/// The worker runs as a child process and speaks NDJSON over stdin/stdout.
/// Each request carries a unique ID that the reader task uses to route the
/// matching response back to its caller.
pub struct WorkerClient {
    stdin: Arc<Mutex<BufWriter<ChildStdin>>>,
    pending: PendingMap,
    _child: Child,
    reader_task: tokio::task::JoinHandle<()>,
    timeout: Duration,
}

impl WorkerClient {
    /// Spawn a worker using the tap's worker settings.
    pub async fn spawn_with_settings(settings: &WorkerSettings) -> WorkerResult<Self> {
        let path = Self::resolve_worker_path(settings)?;
        Self::spawn_with_timeout(path, Duration::from_secs(settings.timeout_secs)).await
    }

    /// Resolve the worker binary path.
    ///
    /// Uses the configured path when present, otherwise looks next to the
    /// current directory and then on `PATH`.
    fn resolve_worker_path(settings: &WorkerSettings) -> WorkerResult<PathBuf> {
        if let Some(path) = &settings.path {
            let expanded = expand_env_vars(path).map_err(|e| {
                WorkerError::SpawnFailed(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    e.to_string(),
                ))
            })?;
            return Ok(PathBuf::from(expanded));
        }

        let local = PathBuf::from(format!("./{}", WORKER_BINARY));
        if local.exists() {
            return Ok(local);
        }

        if let Some(paths) = std::env::var_os("PATH") {
            for dir in std::env::split_paths(&paths) {
                let candidate = dir.join(WORKER_BINARY);
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }

        Err(WorkerError::SpawnFailed(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "worker binary not found; set worker.path in the config",
        )))
    }

    /// Spawn a new worker process with a request timeout.
    pub async fn spawn_with_timeout<P: AsRef<Path>>(
        worker_path: P,
        timeout: Duration,
    ) -> WorkerResult<Self> {
        debug!(path = %worker_path.as_ref().display(), "spawning worker");

        let mut child = Command::new(worker_path.as_ref())
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(WorkerError::SpawnFailed)?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            return Err(WorkerError::SpawnFailed(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "worker stdio not captured",
            )));
        };

        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let reader_task = Self::spawn_reader_task(stdout, pending.clone());

        Ok(Self {
            stdin: Arc::new(Mutex::new(BufWriter::new(stdin))),
            pending,
            _child: child,
            reader_task,
            timeout,
        })
    }

    /// Spawn the background task that reads responses from the worker.
    fn spawn_reader_task(stdout: ChildStdout, pending: PendingMap) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut reader = BufReader::new(stdout);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => break,
                    Ok(_) => match serde_json::from_str::<ResponseEnvelope>(&line) {
                        Ok(resp) => {
                            if let Some(tx) = pending.lock().await.remove(&resp.id) {
                                let _ = tx.send(resp);
                            }
                        }
                        Err(e) => warn!(error = %e, "worker: failed to parse response"),
                    },
                    Err(e) => {
                        warn!(error = %e, "worker: read error");
                        break;
                    }
                }
            }

            // Fail everything still waiting.
            let mut pending = pending.lock().await;
            for (id, tx) in pending.drain() {
                let _ = tx.send(ResponseEnvelope {
                    id,
                    success: false,
                    result: None,
                    error: Some(ErrorInfo {
                        code: "WORKER_EXITED".to_string(),
                        message: "Worker process exited unexpectedly".to_string(),
                    }),
                });
            }
        })
    }

    /// Send a request to the worker and wait for its response.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails, the request
    /// times out, the worker answers with an error, or the result cannot be
    /// deserialized into `R`.
    pub async fn request<P, R>(&self, method: &str, params: P) -> WorkerResult<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        if !self.is_alive() {
            return Err(WorkerError::WorkerExited);
        }

        let id = uuid::Uuid::new_v4().to_string();

        let request = RequestEnvelope {
            id: id.clone(),
            method: method.to_string(),
            params: serde_json::to_value(params).map_err(WorkerError::SerializeFailed)?,
        };

        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id.clone(), tx);

        {
            let mut stdin = self.stdin.lock().await;
            let line =
                serde_json::to_string(&request).map_err(WorkerError::SerializeFailed)? + "\n";
            stdin
                .write_all(line.as_bytes())
                .await
                .map_err(WorkerError::WriteFailed)?;
            stdin.flush().await.map_err(WorkerError::WriteFailed)?;
        }

        let response = match tokio::time::timeout(self.timeout, rx).await {
            Ok(received) => received?,
            Err(_) => {
                self.pending.lock().await.remove(&id);
                return Err(WorkerError::Timeout(self.timeout.as_secs()));
            }
        };

        Self::into_result(response)
    }

    /// Turn a response envelope into the typed result or a classified error.
    fn into_result<R: DeserializeOwned>(response: ResponseEnvelope) -> WorkerResult<R> {
        if response.success {
            let result = response.result.unwrap_or(serde_json::Value::Null);
            serde_json::from_value(result).map_err(WorkerError::DeserializeFailed)
        } else {
            let error = response.error.unwrap_or_else(|| ErrorInfo {
                code: "UNKNOWN".to_string(),
                message: "Unknown error".to_string(),
            });
            Err(WorkerError::from_code(&error.code, &error.message))
        }
    }

    /// Check if the worker is still running.
    pub fn is_alive(&self) -> bool {
        !self.reader_task.is_finished()
    }
}
