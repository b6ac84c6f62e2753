//! Child-side process setup: resource ceilings and process grouping
//!
//! Ceilings are installed through a pre-exec hook, so they apply to the
//! forked child only and never to the harness. On platforms without
//! per-process rlimits nothing is installed and only the wall-clock timeout
//! bounds the child.

use crate::models::execution::ResourceLimits;
use std::process::Command;

/// Prepare `cmd` so the spawned child runs in its own process group under
/// `limits`
pub fn configure_child(cmd: &mut Command, limits: ResourceLimits) {
    configure_process_group(cmd);
    install_resource_limits(cmd, limits);
}

#[cfg(unix)]
fn configure_process_group(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(not(unix))]
fn configure_process_group(_cmd: &mut Command) {}

#[cfg(unix)]
fn install_resource_limits(cmd: &mut Command, limits: ResourceLimits) {
    use std::os::unix::process::CommandExt;

    // SAFETY: the hook only issues setrlimit syscalls and converts an errno;
    // it neither allocates nor touches locks held by other threads.
    unsafe {
        cmd.pre_exec(move || apply_in_child(limits));
    }
}

#[cfg(not(unix))]
fn install_resource_limits(_cmd: &mut Command, limits: ResourceLimits) {
    tracing::debug!(
        cpu_seconds = limits.cpu_seconds,
        memory_bytes = limits.memory_bytes,
        "per-process resource limits unsupported on this platform"
    );
}

/// Set CPU-time and address-space ceilings on the calling process.
/// Soft and hard values are equal so the child cannot raise them.
#[cfg(unix)]
fn apply_in_child(limits: ResourceLimits) -> std::io::Result<()> {
    use nix::sys::resource::{setrlimit, Resource};

    setrlimit(Resource::RLIMIT_CPU, limits.cpu_seconds, limits.cpu_seconds)
        .map_err(std::io::Error::from)?;
    setrlimit(Resource::RLIMIT_AS, limits.memory_bytes, limits.memory_bytes)
        .map_err(std::io::Error::from)?;
    Ok(())
}

/// Kill every process in the group led by `pid`. Falls back to the caller
/// killing the leader directly when the group signal cannot be delivered.
#[cfg(unix)]
pub fn kill_process_group(pid: u32) -> bool {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    match i32::try_from(pid) {
        Ok(raw) => killpg(Pid::from_raw(raw), Signal::SIGKILL).is_ok(),
        Err(_) => false,
    }
}

#[cfg(not(unix))]
pub fn kill_process_group(_pid: u32) -> bool {
    false
}
