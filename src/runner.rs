//! Execution of the wrapped tool.
//!
//! The runner is policy-free: it captures output and reports how the
//! process exited. Deciding what the output means is left to
//! [`crate::classify`].

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Per-invocation wall-clock limit used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How long to keep draining pipes after a timed-out process was killed.
const KILL_GRACE: Duration = Duration::from_secs(2);

/// Outcome of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Stdout and stderr lines, interleaved in arrival order.
    pub output: String,
    /// True iff the process exited with status 0.
    pub succeeded: bool,
    /// Raw exit status; `None` if the process never started or was killed.
    pub exit_code: Option<i32>,
    /// True if the process was killed for exceeding the timeout.
    pub timed_out: bool,
}

impl CommandResult {
    pub fn failed(&self) -> bool {
        !self.succeeded
    }
}

/// Capability to invoke an external program.
pub trait CommandRunner {
    /// Run `program args...` in `dir` to completion or timeout.
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> CommandResult;

    /// Whether `program` can be found on `PATH`.
    fn is_available(&self, program: &str) -> bool;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> CommandResult {
        (**self).run(dir, program, args)
    }

    fn is_available(&self, program: &str) -> bool {
        (**self).is_available(program)
    }
}

/// Runs real processes with a bounded timeout.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> CommandResult {
        tracing::debug!(dir = %dir.display(), program, ?args, "running command");

        let mut child = match Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(program, error = %e, "failed to start command");
                return CommandResult {
                    output: format!("failed to start {program}: {e}"),
                    succeeded: false,
                    exit_code: None,
                    timed_out: false,
                };
            }
        };

        let captured = Arc::new(Mutex::new(String::new()));
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let mut lanes = 0;
        if let Some(stdout) = child.stdout.take() {
            spawn_reader(stdout, Arc::clone(&captured), done_tx.clone());
            lanes += 1;
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_reader(stderr, Arc::clone(&captured), done_tx.clone());
            lanes += 1;
        }
        drop(done_tx);

        // Both lanes reach EOF before the process is reaped.
        let deadline = Instant::now() + self.timeout;
        let mut timed_out = false;
        let mut finished = 0;
        while finished < lanes {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match done_rx.recv_timeout(remaining) {
                Ok(()) => finished += 1,
                Err(RecvTimeoutError::Timeout) => {
                    timed_out = true;
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if timed_out {
            tracing::warn!(
                program,
                timeout_secs = self.timeout.as_secs(),
                "command timed out, killing it"
            );
            kill(&mut child);
            let grace = Instant::now() + KILL_GRACE;
            while finished < lanes {
                let remaining = grace.saturating_duration_since(Instant::now());
                if done_rx.recv_timeout(remaining).is_err() {
                    break;
                }
                finished += 1;
            }
        }

        let (succeeded, exit_code) = match child.wait() {
            Ok(status) => (!timed_out && status.success(), status.code()),
            Err(e) => {
                tracing::warn!(program, error = %e, "failed to wait for command");
                (false, None)
            }
        };

        let mut output = captured
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone());
        if timed_out {
            output.push_str(&format!(
                "{program} timed out after {}s\n",
                self.timeout.as_secs()
            ));
        }

        CommandResult {
            output,
            succeeded,
            exit_code,
            timed_out,
        }
    }

    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Drain `stream` line by line into `sink`, then signal on `done`.
fn spawn_reader<R>(stream: R, sink: Arc<Mutex<String>>, done: mpsc::Sender<()>)
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    if let Ok(mut out) = sink.lock() {
                        out.push_str(&line);
                        if !line.ends_with('\n') {
                            out.push('\n');
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "output stream closed with error");
                    break;
                }
            }
        }
        let _ = done.send(());
    });
}

fn kill(child: &mut Child) {
    if let Err(e) = child.kill() {
        tracing::debug!(error = %e, "kill after timeout failed");
    }
}
