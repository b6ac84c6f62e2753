//! Resource-limited subprocess runner
//!
//! Spawns one child under CPU and address-space ceilings, drains its stdout
//! and stderr on background threads, and enforces a wall-clock timeout by
//! killing the child's whole process group.
//!
//! Capture is bounded on both pipes: stdout keeps its first bytes up to a
//! budget, stderr keeps its last bytes. The rest is read and discarded so the
//! child never stalls on a full pipe. After the child exits or is killed the
//! readers get a short grace period to reach end-of-file; a reader still
//! blocked after that is abandoned with whatever it captured.

use crate::core::limits;
use crate::models::execution::ResourceLimits;
use std::collections::VecDeque;
use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Time readers may keep draining once the child is gone
const PIPE_GRACE: Duration = Duration::from_millis(500);

const READ_CHUNK: usize = 8 * 1024;

/// Leading stdout bytes kept when no budget is configured
pub const DEFAULT_STDOUT_LIMIT: usize = 64 * 1024;

/// Trailing stderr bytes kept per run
pub const STDERR_TAIL_LIMIT: usize = 1024 * 1024;

/// Raw result of one child run
#[derive(Debug)]
pub enum RunOutcome {
    /// The child exited (normally or by signal) before the deadline
    Completed {
        status: ExitStatus,
        elapsed: Duration,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    },
    /// The deadline passed; the child's group was killed and reaped.
    /// Output is whatever was written before the kill.
    TimedOut { stdout: Vec<u8>, stderr: Vec<u8> },
}

/// Runs commands under fixed resource ceilings and a wall-clock budget
#[derive(Debug, Clone, Copy)]
pub struct ResourceLimitedRunner {
    limits: ResourceLimits,
    timeout: Duration,
    stdout_limit: usize,
}

impl ResourceLimitedRunner {
    pub fn new(limits: ResourceLimits, timeout: Duration) -> Self {
        Self {
            limits,
            timeout,
            stdout_limit: DEFAULT_STDOUT_LIMIT,
        }
    }

    /// Keep at most `bytes` leading bytes of the child's stdout
    pub fn with_stdout_limit(mut self, bytes: usize) -> Self {
        self.stdout_limit = bytes;
        self
    }

    pub fn limits(&self) -> ResourceLimits {
        self.limits
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn stdout_limit(&self) -> usize {
        self.stdout_limit
    }

    /// Spawn `cmd` and wait for it. Errors only when the child cannot be
    /// started or waited on.
    pub fn run(&self, mut cmd: Command) -> io::Result<RunOutcome> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        limits::configure_child(&mut cmd, self.limits);

        let start = Instant::now();
        let mut child = cmd.spawn()?;
        debug!(pid = child.id(), "spawned child");

        let stdout = drain(child.stdout.take(), Capture::head(self.stdout_limit));
        let stderr = drain(child.stderr.take(), Capture::tail(STDERR_TAIL_LIMIT));

        match self.wait(&mut child, start) {
            Ok(Some(status)) => {
                let elapsed = start.elapsed();
                // descendants that outlive the leader would hold the pipes open
                limits::kill_process_group(child.id());
                let (stdout, stderr) = collect(stdout, stderr);
                Ok(RunOutcome::Completed {
                    status,
                    elapsed,
                    stdout,
                    stderr,
                })
            }
            Ok(None) => {
                terminate(&mut child);
                debug!(pid = child.id(), timeout = ?self.timeout, "child killed at deadline");
                let (stdout, stderr) = collect(stdout, stderr);
                Ok(RunOutcome::TimedOut { stdout, stderr })
            }
            Err(e) => {
                terminate(&mut child);
                collect(stdout, stderr);
                Err(e)
            }
        }
    }

    /// Poll until the child exits (`Some`) or the deadline passes (`None`)
    fn wait(&self, child: &mut Child, start: Instant) -> io::Result<Option<ExitStatus>> {
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if start.elapsed() >= self.timeout {
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Kill the child's process group (or the child alone) and reap it
fn terminate(child: &mut Child) {
    if !limits::kill_process_group(child.id()) {
        if let Err(e) = child.kill() {
            warn!(pid = child.id(), error = %e, "failed to kill child");
        }
    }
    if let Err(e) = child.wait() {
        warn!(pid = child.id(), error = %e, "failed to reap child");
    }
}

#[derive(Debug, Clone, Copy)]
enum Keep {
    Head,
    Tail,
}

/// Bytes retained from one pipe
#[derive(Debug)]
struct Capture {
    keep: Keep,
    limit: usize,
    bytes: VecDeque<u8>,
}

impl Capture {
    fn head(limit: usize) -> Self {
        Self {
            keep: Keep::Head,
            limit,
            bytes: VecDeque::new(),
        }
    }

    fn tail(limit: usize) -> Self {
        Self {
            keep: Keep::Tail,
            limit,
            bytes: VecDeque::new(),
        }
    }

    fn push(&mut self, chunk: &[u8]) {
        match self.keep {
            Keep::Head => {
                let room = self.limit.saturating_sub(self.bytes.len());
                self.bytes.extend(&chunk[..chunk.len().min(room)]);
            }
            Keep::Tail => {
                self.bytes.extend(chunk);
                let excess = self.bytes.len().saturating_sub(self.limit);
                self.bytes.drain(..excess);
            }
        }
    }

    fn take(&mut self) -> Vec<u8> {
        Vec::from(std::mem::take(&mut self.bytes))
    }
}

/// A background reader: its capture plus a channel that disconnects at EOF
struct PipeReader {
    capture: Arc<Mutex<Capture>>,
    done: Receiver<()>,
}

impl PipeReader {
    /// Wait for EOF until `deadline`, then hand back what was captured
    fn finish(self, deadline: Instant) -> Vec<u8> {
        let wait = deadline.saturating_duration_since(Instant::now());
        if let Err(RecvTimeoutError::Timeout) = self.done.recv_timeout(wait) {
            debug!("pipe still held open after the child ended; abandoning reader");
        }
        match self.capture.lock() {
            Ok(mut capture) => capture.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>, capture: Capture) -> Option<PipeReader> {
    pipe.map(|mut pipe| {
        let capture = Arc::new(Mutex::new(capture));
        let shared = Arc::clone(&capture);
        let (done_tx, done) = mpsc::channel();

        thread::spawn(move || {
            let mut chunk = [0u8; READ_CHUNK];
            loop {
                match pipe.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => {
                        if let Ok(mut capture) = shared.lock() {
                            capture.push(&chunk[..n]);
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(_) => break,
                }
            }
            let _ = done_tx.send(());
        });

        PipeReader { capture, done }
    })
}

/// Gather both pipes under one shared grace deadline
fn collect(stdout: Option<PipeReader>, stderr: Option<PipeReader>) -> (Vec<u8>, Vec<u8>) {
    let deadline = Instant::now() + PIPE_GRACE;
    let stdout = stdout.map(|reader| reader.finish(deadline)).unwrap_or_default();
    let stderr = stderr.map(|reader| reader.finish(deadline)).unwrap_or_default();
    (stdout, stderr)
}
