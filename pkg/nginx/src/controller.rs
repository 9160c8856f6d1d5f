use crate::backend::Effects;
use crate::certs::CertStore;
use crate::error::NginxError;
use crate::process::NginxProcess;
use crate::sync::ConfigSync;
use anyhow::Context;
use pkg_constants::paths;
use pkg_types::certificate::CertificateBundle;
use pkg_types::ingress::IngressConfig;
use pkg_types::main_config::MainConfig;
use pkg_types::validate;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Facade over the render/sync/cert/process pipeline, the only type the
/// external routing system depends on.
///
/// Stateless across operations apart from its fixed paths and effects
/// backend; the file system is the durable source of truth. One internal
/// mutex serializes every mutating operation so a write can never race a
/// reload that reads the configuration directory.
pub struct NginxController {
    sync: ConfigSync,
    certs: CertStore,
    process: NginxProcess,
    lock: Mutex<()>,
}

impl NginxController {
    /// Controller over `<base>/conf.d` and `<base>/ssl`, with the main
    /// configuration at its well-known `/etc/nginx/nginx.conf` path.
    ///
    /// Creates the managed directories and writes the default main
    /// configuration. Failure here means the controller cannot be used at
    /// all, so it propagates as a fatal construction error.
    pub async fn new(
        base_path: impl AsRef<Path>,
        effects: Arc<dyn Effects>,
    ) -> anyhow::Result<Self> {
        Self::with_paths(base_path, PathBuf::from(paths::MAIN_CONFIG_PATH), effects).await
    }

    /// Same as [`NginxController::new`] with an explicit main
    /// configuration path, for deployments (and tests) that relocate it.
    pub async fn with_paths(
        base_path: impl AsRef<Path>,
        main_config_path: impl Into<PathBuf>,
        effects: Arc<dyn Effects>,
    ) -> anyhow::Result<Self> {
        let base = base_path.as_ref();
        let confd_dir = base.join(paths::CONF_D_DIR);
        let certs_dir = base.join(paths::SSL_DIR);

        effects
            .create_dir_all(&confd_dir)
            .await
            .context("creating conf.d directory")?;
        effects
            .create_dir_all(&certs_dir)
            .await
            .context("creating ssl directory")?;

        let controller = Self {
            sync: ConfigSync::new(confd_dir, main_config_path, effects.clone()),
            certs: CertStore::new(certs_dir, effects.clone()),
            process: NginxProcess::new(effects),
            lock: Mutex::new(()),
        };

        controller
            .sync
            .upsert_main(&MainConfig::default())
            .await
            .context("writing default main configuration")?;

        info!(
            "nginx controller ready (conf.d: {}, ssl: {})",
            controller.sync.confd_dir().display(),
            controller.certs.certs_dir().display()
        );
        Ok(controller)
    }

    /// Create or update the configuration unit stored under `name`.
    pub async fn add_or_update_ingress(
        &self,
        name: &str,
        config: &IngressConfig,
    ) -> Result<(), NginxError> {
        check_name(name)?;
        validate::validate_ingress(config).map_err(|e| NginxError::Rejected {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        let _guard = self.lock.lock().await;
        self.sync.upsert(name, config).await
    }

    /// Delete the configuration unit stored under `name`. Best-effort:
    /// completes even if the file is already gone.
    pub async fn delete_ingress(&self, name: &str) -> Result<(), NginxError> {
        check_name(name)?;
        let _guard = self.lock.lock().await;
        self.sync.remove(name).await;
        Ok(())
    }

    /// Persist a certificate bundle and return the path server blocks
    /// should reference.
    pub async fn add_or_update_cert(
        &self,
        bundle: &CertificateBundle,
    ) -> Result<PathBuf, NginxError> {
        check_name(&bundle.name)?;
        let _guard = self.lock.lock().await;
        self.certs.put(bundle).await
    }

    /// Replace the process-wide main configuration file.
    pub async fn update_main_config(&self, config: &MainConfig) -> Result<(), NginxError> {
        let _guard = self.lock.lock().await;
        self.sync.upsert_main(config).await
    }

    /// Start nginx.
    pub async fn start(&self) -> Result<(), NginxError> {
        let _guard = self.lock.lock().await;
        if let Ok(version) = self.process.version().await
            && !version.is_empty()
        {
            info!("{}", version);
        }
        self.process.start().await
    }

    /// Validate the on-disk configuration and signal the running process
    /// to adopt it. See [`NginxProcess::reload`] for failure semantics.
    pub async fn reload(&self) -> Result<(), NginxError> {
        let _guard = self.lock.lock().await;
        self.process.reload().await
    }

    /// Stable path the bundle with this name is stored at.
    pub fn cert_path(&self, name: &str) -> PathBuf {
        self.certs.pem_path(name)
    }

    /// Stable path the unit with this name is stored at.
    pub fn conf_path(&self, name: &str) -> PathBuf {
        self.sync.conf_path(name)
    }
}

fn check_name(name: &str) -> Result<(), NginxError> {
    validate::validate_name(name).map_err(|e| NginxError::Rejected {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
