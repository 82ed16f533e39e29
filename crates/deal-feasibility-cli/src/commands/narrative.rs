use clap::Args;
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use deal_feasibility_core::narrative::{NarrativeError, NarrativeProvider, NarrativeRequest};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Where narrative commentary comes from (at most one source)
#[derive(Args)]
pub struct NarrativeArgs {
    /// JSON file holding a previously captured collaborator response
    #[arg(long, conflicts_with = "narrative_cmd")]
    pub commentary_file: Option<String>,

    /// Program that reads the request JSON on stdin and prints commentary JSON
    #[arg(long)]
    pub narrative_cmd: Option<String>,

    /// Seconds to wait for --narrative-cmd before giving up
    #[arg(long, default_value = "120")]
    pub narrative_timeout: u64,
}

pub fn provider_from_args(args: &NarrativeArgs) -> Option<Box<dyn NarrativeProvider>> {
    if let Some(ref path) = args.commentary_file {
        return Some(Box::new(FileProvider { path: path.clone() }));
    }
    args.narrative_cmd.as_ref().map(|command| {
        Box::new(CommandProvider {
            command: command.clone(),
            timeout: Duration::from_secs(args.narrative_timeout),
        }) as Box<dyn NarrativeProvider>
    })
}

/// Replays a response saved to disk.
struct FileProvider {
    path: String,
}

impl NarrativeProvider for FileProvider {
    fn request_commentary(&self, _request: &NarrativeRequest<'_>) -> Result<Value, NarrativeError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| NarrativeError::Unavailable(format!("{}: {}", self.path, e)))?;
        serde_json::from_str(&contents).map_err(|e| NarrativeError::Malformed(e.to_string()))
    }
}

/// Runs an external program per request.
struct CommandProvider {
    command: String,
    timeout: Duration,
}

impl NarrativeProvider for CommandProvider {
    fn request_commentary(&self, request: &NarrativeRequest<'_>) -> Result<Value, NarrativeError> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| NarrativeError::Unavailable("empty --narrative-cmd".into()))?;
        let payload =
            serde_json::to_vec(request).map_err(|e| NarrativeError::Malformed(e.to_string()))?;

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| NarrativeError::Unavailable(format!("{program}: {e}")))?;
        debug!(program, bytes = payload.len(), "narrative request sent");

        // Drain stdout on a separate thread so a chatty child cannot block on a full pipe
        let Some(mut stdout) = child.stdout.take() else {
            reap(&mut child);
            return Err(NarrativeError::Unavailable("child stdout not captured".into()));
        };
        let reader = thread::spawn(move || {
            let mut buffer = String::new();
            stdout.read_to_string(&mut buffer).map(|_| buffer)
        });

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&payload) {
                // The child may answer without reading its input
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!(program, "narrative command closed stdin early")
                }
                Err(e) => {
                    reap(&mut child);
                    let _ = reader.join();
                    return Err(NarrativeError::Unavailable(e.to_string()));
                }
                Ok(()) => {}
            }
        }

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    reap(&mut child);
                    let _ = reader.join();
                    return Err(NarrativeError::Timeout {
                        seconds: self.timeout.as_secs(),
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    reap(&mut child);
                    return Err(NarrativeError::Unavailable(e.to_string()));
                }
            }
        };

        if !status.success() {
            return Err(NarrativeError::Unavailable(format!(
                "{program} exited with {status}"
            )));
        }

        let body = reader
            .join()
            .map_err(|_| NarrativeError::Unavailable("stdout reader panicked".into()))?
            .map_err(|e| NarrativeError::Unavailable(e.to_string()))?;
        serde_json::from_str(body.trim()).map_err(|e| NarrativeError::Malformed(e.to_string()))
    }
}

/// Kill the child and collect its exit status.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
