use crate::error::{NginxError, SubprocessError};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

/// Captured output of a completed shell command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Side-effect capability behind the controller: file replacement and
/// shell execution. Selected once at construction, [`HostEffects`] for a
/// real nginx installation or [`DryRunEffects`] to record intent without
/// touching anything. Call sites carry no mode conditionals.
#[async_trait]
pub trait Effects: Send + Sync {
    /// Replace `path` with `contents` as a whole, or leave the previous
    /// file intact. Partial content must never become visible.
    async fn write_file(&self, path: &Path, contents: &str) -> Result<(), NginxError>;

    async fn remove_file(&self, path: &Path) -> Result<(), NginxError>;

    async fn create_dir_all(&self, path: &Path) -> Result<(), NginxError>;

    /// Run a shell command line to completion, capturing stdout and
    /// stderr separately and in full.
    async fn shell(&self, command: &str) -> Result<CommandOutput, SubprocessError>;
}

/// Real mode: files and subprocesses on the host.
#[derive(Debug, Default)]
pub struct HostEffects {
    /// Upper bound on any shell invocation. `None` = wait indefinitely,
    /// mirroring nginx's own unmonitored blocking behavior.
    command_timeout: Option<Duration>,
}

impl HostEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound every shell invocation so a hung nginx binary cannot hang
    /// the caller forever.
    pub fn with_command_timeout(timeout: Duration) -> Self {
        Self {
            command_timeout: Some(timeout),
        }
    }
}

#[async_trait]
impl Effects for HostEffects {
    async fn write_file(&self, path: &Path, contents: &str) -> Result<(), NginxError> {
        // Temp file in the target directory so the final rename stays on
        // one file system and is atomic.
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| NginxError::persistence(path, e))?;
        tmp.write_all(contents.as_bytes())
            .map_err(|e| NginxError::persistence(path, e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| NginxError::persistence(path, e))?;
        tmp.persist(path)
            .map_err(|e| NginxError::persistence(path, e.error))?;
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<(), NginxError> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| NginxError::persistence(path, e))
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), NginxError> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| NginxError::persistence(path, e))
    }

    async fn shell(&self, command: &str) -> Result<CommandOutput, SubprocessError> {
        debug!("executing `{}`", command);
        let spawn_failure = |reason: String| SubprocessError {
            command: command.to_string(),
            stdout: String::new(),
            stderr: String::new(),
            reason,
        };

        let run = tokio::process::Command::new("sh").arg("-c").arg(command).output();
        let output = match self.command_timeout {
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| spawn_failure(format!("timed out after {:?}", limit)))?,
            None => run.await,
        }
        .map_err(|e| spawn_failure(format!("failed to execute: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(SubprocessError {
                command: command.to_string(),
                stdout,
                stderr,
                reason: output.status.to_string(),
            });
        }
        Ok(CommandOutput { stdout, stderr })
    }
}

/// One suppressed side effect recorded by [`DryRunEffects`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    WriteFile { path: PathBuf, contents: String },
    RemoveFile { path: PathBuf },
    CreateDirAll { path: PathBuf },
    Shell { command: String },
}

/// Dry-run mode: every side effect is suppressed and recorded in order,
/// and would-be file content is echoed to the debug log so a candidate
/// configuration can be inspected without mutating a real installation.
#[derive(Debug, Default)]
pub struct DryRunEffects {
    intents: Mutex<Vec<Intent>>,
}

impl DryRunEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything the controller would have done, in call order.
    pub fn intents(&self) -> Vec<Intent> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Intent>> {
        match self.intents.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl Effects for DryRunEffects {
    async fn write_file(&self, path: &Path, contents: &str) -> Result<(), NginxError> {
        info!("dry run: would write {}", path.display());
        debug!("dry run content for {}:\n{}", path.display(), contents);
        self.lock().push(Intent::WriteFile {
            path: path.to_path_buf(),
            contents: contents.to_string(),
        });
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<(), NginxError> {
        info!("dry run: would delete {}", path.display());
        self.lock().push(Intent::RemoveFile {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), NginxError> {
        info!("dry run: would create directory {}", path.display());
        self.lock().push(Intent::CreateDirAll {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    async fn shell(&self, command: &str) -> Result<CommandOutput, SubprocessError> {
        info!("dry run: would execute `{}`", command);
        self.lock().push(Intent::Shell {
            command: command.to_string(),
        });
        Ok(CommandOutput::default())
    }
}
