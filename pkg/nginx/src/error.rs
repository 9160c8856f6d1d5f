use std::path::PathBuf;
use thiserror::Error;

/// A shell invocation that could not be started or exited non-zero.
///
/// Carries the command line and the full captured output so callers can
/// diagnose an nginx-level failure without re-running the command.
#[derive(Debug, Error)]
#[error("command `{command}` failed: {reason}\nstdout: {stdout:?}\nstderr: {stderr:?}")]
pub struct SubprocessError {
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    /// Exit status, or why the process could not be spawned.
    pub reason: String,
}

/// Typed errors returned by the controller's per-operation calls.
///
/// Construction-time impossibilities (uncreatable directories) are not
/// represented here; they surface as `anyhow::Error` from
/// [`crate::controller::NginxController::new`], since the controller is
/// unusable in a partially constructed state.
#[derive(Debug, Error)]
pub enum NginxError {
    /// No template is registered under this identifier.
    #[error("template '{name}' not found")]
    Template { name: String },

    /// The model value does not fit the named template.
    #[error("template '{name}' cannot render a {model} value")]
    Render { name: String, model: &'static str },

    /// Rejected before touching the file system: bad unit name or a
    /// broken model invariant.
    #[error("rejected configuration '{name}': {reason}")]
    Rejected { name: String, reason: String },

    /// `nginx -t` refused the candidate configuration. The previously
    /// running configuration stays live and untouched.
    #[error("invalid nginx configuration detected, not reloading: {0}")]
    Validation(#[source] SubprocessError),

    /// Validation passed but the running process failed to apply the new
    /// configuration. Process state is not guaranteed consistent; callers
    /// should re-check nginx health out of band.
    #[error("reloading nginx failed: {0}")]
    Reload(#[source] SubprocessError),

    /// nginx failed to start. There is no meaningful continuation.
    #[error("starting nginx failed: {0}")]
    Start(#[source] SubprocessError),

    /// File write/delete failure unrelated to configuration validity.
    #[error("persistence failure at {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other external command failure.
    #[error(transparent)]
    Subprocess(#[from] SubprocessError),
}

impl NginxError {
    pub(crate) fn persistence(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.to_path_buf(),
            source,
        }
    }
}
