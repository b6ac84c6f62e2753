//! Sandboxed execution against a real interpreter
//!
//! Every test returns early when `python3` is not on PATH.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};
use tempfile::tempdir;
use vibebench::{ExecutionOutcome, ExecutionStatus, ResourceLimits, SandboxedExecutor};

fn python_available() -> bool {
    Command::new("python3")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn executor(limits: ResourceLimits, timeout: Duration) -> SandboxedExecutor {
    SandboxedExecutor::new("python3", limits, timeout)
}

fn write_script(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_print_succeeds() {
    if !python_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let script = write_script(dir.path(), "hello.py", "print(1)\n");

    let outcome = executor(ResourceLimits::default(), Duration::from_secs(5)).run(&script);

    match outcome {
        ExecutionOutcome::Success {
            duration_secs,
            stdout_preview,
            stderr,
        } => {
            assert_eq!(stdout_preview, "1");
            assert!(stderr.is_empty());
            assert!(duration_secs > 0.0 && duration_secs < 5.0);
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[test]
fn test_stdout_preview_is_truncated() {
    if !python_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let script = write_script(dir.path(), "loud.py", "print('x' * 500)\n");

    let outcome = executor(ResourceLimits::default(), Duration::from_secs(5))
        .with_stdout_preview_bytes(10)
        .run(&script);

    assert_eq!(outcome.status(), ExecutionStatus::Success);
    assert_eq!(outcome.stdout_preview(), "xxxxxxxxxx");
}

#[test]
fn test_exception_is_runtime_error() {
    if !python_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let script = write_script(
        dir.path(),
        "boom.py",
        "print('before')\nraise ValueError('boom')\n",
    );

    let outcome = executor(ResourceLimits::default(), Duration::from_secs(5)).run(&script);

    match outcome {
        ExecutionOutcome::RuntimeError {
            exit_code,
            stdout_preview,
            stderr,
            ..
        } => {
            assert_eq!(exit_code, Some(1));
            assert_eq!(stdout_preview, "before");
            assert!(stderr.ends_with("ValueError: boom"));
        }
        other => panic!("expected runtime error, got {:?}", other),
    }
}

#[test]
fn test_timeout_reports_configured_limit() {
    if !python_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let script = write_script(dir.path(), "sleepy.py", "import time\ntime.sleep(30)\n");

    let started = Instant::now();
    let outcome = executor(ResourceLimits::default(), Duration::from_secs(1)).run(&script);

    assert_eq!(outcome.status(), ExecutionStatus::Timeout);
    assert_eq!(outcome.message(), Some("Exceeded 1s"));
    assert_eq!(outcome.duration_secs(), None);
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_cpu_ceiling_stops_busy_loop() {
    if !python_available() {
        return;
    }
    let dir = tempdir().unwrap();
    let script = write_script(dir.path(), "spin.py", "while True:\n    pass\n");

    let limits = ResourceLimits::from_megabytes(1, 512).unwrap();
    let outcome = executor(limits, Duration::from_secs(20)).run(&script);

    // the CPU ceiling fires long before the wall-clock budget
    assert_eq!(outcome.status(), ExecutionStatus::RuntimeError);
    assert!(outcome.duration_secs().unwrap() < 20.0);
}

#[cfg(target_os = "linux")]
mod linux {
    use super::*;
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    /// Script that starts `sleep 20` in a new session, records its pid and
    /// then runs `tail`. The sleeper escapes the group kill and keeps the
    /// output pipes open.
    fn detached_sleeper(pid_file: &Path, tail: &str) -> String {
        format!(
            "import subprocess, time\n\
             child = subprocess.Popen(['sleep', '20'], start_new_session=True)\n\
             with open({:?}, 'w') as f:\n    f.write(str(child.pid))\n\
             {}\n",
            pid_file.display().to_string(),
            tail
        )
    }

    fn kill_recorded(pid_file: &Path) {
        if let Ok(pid) = fs::read_to_string(pid_file) {
            if let Ok(pid) = pid.trim().parse() {
                let _ = kill(Pid::from_raw(pid), Signal::SIGKILL);
            }
        }
    }

    fn rss_kib() -> u64 {
        fs::read_to_string("/proc/self/status")
            .unwrap()
            .lines()
            .find_map(|line| line.strip_prefix("VmRSS:"))
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|kib| kib.parse().ok())
            .unwrap()
    }

    /// Alive means signalable and not a zombie waiting to be reaped
    fn is_running(pid: i32) -> bool {
        if kill(Pid::from_raw(pid), None).is_err() {
            return false;
        }
        match fs::read_to_string(format!("/proc/{}/stat", pid)) {
            Ok(stat) => stat
                .rsplit(')')
                .next()
                .map(|rest| !rest.trim_start().starts_with('Z'))
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    fn wait_until_gone(pid: i32) -> bool {
        let deadline = Instant::now() + Duration::from_secs(3);
        while Instant::now() < deadline {
            if !is_running(pid) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        false
    }

    #[test]
    fn test_memory_ceiling_is_runtime_error() {
        if !python_available() {
            return;
        }
        let dir = tempdir().unwrap();
        let script = write_script(
            dir.path(),
            "hog.py",
            "data = bytearray(2 * 1024 * 1024 * 1024)\nprint(len(data))\n",
        );

        let outcome = executor(ResourceLimits::default(), Duration::from_secs(10)).run(&script);

        assert_eq!(outcome.status(), ExecutionStatus::RuntimeError);
        assert!(outcome.stderr().contains("MemoryError"));
    }

    #[test]
    fn test_timeout_kills_child_and_descendants() {
        if !python_available() {
            return;
        }
        let dir = tempdir().unwrap();
        let pid_file = dir.path().join("pids");
        let script = write_script(
            dir.path(),
            "forker.py",
            &format!(
                "import os, subprocess, time\n\
                 child = subprocess.Popen(['sleep', '60'])\n\
                 with open({:?}, 'w') as f:\n    f.write(f'{{os.getpid()}} {{child.pid}}')\n\
                 time.sleep(60)\n",
                pid_file.display().to_string()
            ),
        );

        let outcome = executor(ResourceLimits::default(), Duration::from_secs(2)).run(&script);
        assert_eq!(outcome.status(), ExecutionStatus::Timeout);

        let pids: Vec<i32> = fs::read_to_string(&pid_file)
            .unwrap()
            .split_whitespace()
            .map(|pid| pid.parse().unwrap())
            .collect();
        assert_eq!(pids.len(), 2);
        for pid in pids {
            assert!(wait_until_gone(pid), "process {} survived the timeout", pid);
        }
    }

    #[test]
    fn test_timeout_returns_while_detached_process_holds_pipes() {
        if !python_available() {
            return;
        }
        let dir = tempdir().unwrap();
        let pid_file = dir.path().join("sleeper");
        let script = write_script(
            dir.path(),
            "escape.py",
            &detached_sleeper(&pid_file, "time.sleep(30)"),
        );

        let started = Instant::now();
        let outcome = executor(ResourceLimits::default(), Duration::from_secs(1)).run(&script);
        let elapsed = started.elapsed();
        kill_recorded(&pid_file);

        assert_eq!(outcome.status(), ExecutionStatus::Timeout);
        assert!(elapsed < Duration::from_secs(4), "run took {:?}", elapsed);
    }

    #[test]
    fn test_exit_returns_while_detached_process_holds_pipes() {
        if !python_available() {
            return;
        }
        let dir = tempdir().unwrap();
        let pid_file = dir.path().join("sleeper");
        let script = write_script(
            dir.path(),
            "leave.py",
            &detached_sleeper(&pid_file, "print('done')"),
        );

        let started = Instant::now();
        let outcome = executor(ResourceLimits::default(), Duration::from_secs(10)).run(&script);
        let elapsed = started.elapsed();
        kill_recorded(&pid_file);

        assert_eq!(outcome.status(), ExecutionStatus::Success);
        assert_eq!(outcome.stdout_preview(), "done");
        assert!(elapsed < Duration::from_secs(4), "run took {:?}", elapsed);
    }

    #[test]
    fn test_stdout_capture_is_bounded() {
        if !python_available() {
            return;
        }
        let dir = tempdir().unwrap();
        let script = write_script(
            dir.path(),
            "chatty.py",
            "import sys\nchunk = 'x' * (1 << 20)\nfor _ in range(400):\n    sys.stdout.write(chunk)\n",
        );

        let before = rss_kib();
        let outcome = executor(ResourceLimits::default(), Duration::from_secs(30)).run(&script);
        let growth = rss_kib().saturating_sub(before);

        assert_eq!(outcome.status(), ExecutionStatus::Success);
        assert_eq!(outcome.stdout_preview().len(), 100);
        // 400 MiB went through the pipe; only the preview may stay resident
        assert!(growth < 100 * 1024, "harness grew by {} KiB", growth);
    }
}
