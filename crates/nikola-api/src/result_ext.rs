//! Logging for fallible startup steps.
//!
//! Schema loading, pool creation and table initialization each fail with
//! their own error type before being folded into `anyhow` by `main`;
//! `ResultExt::log` records which step failed and where.

use std::fmt::Display;
use tracing::error;

/// Log an `Err` under a step name, then pass the result through.
pub trait ResultExt<T, E> {
    /// Emits one `error` event carrying `step` and the call site; `Ok`
    /// values are untouched.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use nikola_api::result_ext::ResultExt;
    ///
    /// let schema = load_schema(&path).log("loading resource schema")?;
    /// ```
    fn log<S: ToString>(self, step: S) -> Result<T, E>;
}

impl<T, E: Display> ResultExt<T, E> for Result<T, E> {
    #[track_caller]
    fn log<S: ToString>(self, step: S) -> Result<T, E> {
        if let Err(ref e) = self {
            let at = std::panic::Location::caller();
            error!(
                target: "nikola_api",
                step = %step.to_string(),
                error = %e,
                at = %format_args!("{}:{}", at.file(), at.line()),
                "Startup step failed"
            );
        }
        self
    }
}
