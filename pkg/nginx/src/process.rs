use crate::backend::Effects;
use crate::error::NginxError;
use pkg_constants::nginx;
use std::sync::Arc;
use tracing::info;

/// Supervises the nginx process: start, and the validate-then-reload
/// protocol that keeps a malformed configuration from taking down live
/// routing.
pub struct NginxProcess {
    effects: Arc<dyn Effects>,
}

impl NginxProcess {
    pub fn new(effects: Arc<dyn Effects>) -> Self {
        Self { effects }
    }

    /// Start nginx. Failure is surfaced to the caller, never retried
    /// here.
    pub async fn start(&self) -> Result<(), NginxError> {
        info!("starting nginx");
        self.effects
            .shell(nginx::START_COMMAND)
            .await
            .map_err(NginxError::Start)?;
        Ok(())
    }

    /// Validate the on-disk configuration, then signal the running
    /// process to adopt it.
    ///
    /// When `nginx -t` fails the reload is not attempted and the running
    /// configuration stays untouched. When validation passes but the
    /// reload fails, the process may be left partially updated; that risk
    /// is inherent to nginx's live reload and is reported, not rolled
    /// back.
    pub async fn reload(&self) -> Result<(), NginxError> {
        self.effects
            .shell(nginx::VERIFY_COMMAND)
            .await
            .map_err(NginxError::Validation)?;
        self.effects
            .shell(nginx::RELOAD_COMMAND)
            .await
            .map_err(NginxError::Reload)?;
        info!("nginx reloaded");
        Ok(())
    }

    /// Version banner of the installed nginx (`nginx -v` prints to
    /// stderr). Empty in dry-run mode.
    pub async fn version(&self) -> Result<String, NginxError> {
        let out = self.effects.shell(nginx::VERSION_COMMAND).await?;
        Ok(out.stderr.trim().to_string())
    }
}
