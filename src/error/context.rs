//! Helpers for attaching context to errors and deciding which ones stop a run
//!
//! A benchmark run keeps going past per-file problems; only critical errors
//! (bad configuration, an unwritable report) end it.

use crate::error::{BenchError, ErrorSeverity, Result};

/// Turn a foreign error into a configuration error prefixed with context
pub trait ResultExt<T> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| BenchError::config_error(format!("{}: {}", context(), err)))
    }
}

/// Log `err` at its severity. Critical errors are handed back to the caller;
/// everything else is consumed.
pub fn handle_error(err: BenchError) -> Option<BenchError> {
    let message = err.user_message();

    match err.severity() {
        ErrorSeverity::Warning => {
            tracing::warn!("{}", message);
            None
        }
        ErrorSeverity::Error => {
            tracing::error!("{}", message);
            None
        }
        ErrorSeverity::Critical => {
            tracing::error!("critical: {}", message);
            Some(err)
        }
    }
}

/// Run `f`, downgrading non-critical failures to `Ok(None)`
pub fn try_with_recovery<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(err) => handle_error(err).map_or(Ok(None), Err),
    }
}

pub trait OptionExt<T> {
    /// `ok_or_else` returning a [`BenchError`]
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> BenchError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> BenchError,
    {
        self.ok_or_else(err_fn)
    }
}
