use crate::backend::Effects;
use crate::error::NginxError;
use crate::template::{self, TemplateData};
use pkg_constants::{nginx, paths};
use pkg_types::ingress::IngressConfig;
use pkg_types::main_config::MainConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maps configuration-unit names to files under the managed `conf.d`
/// directory and owns the singleton main configuration file.
pub struct ConfigSync {
    confd_dir: PathBuf,
    main_config_path: PathBuf,
    effects: Arc<dyn Effects>,
}

impl ConfigSync {
    pub fn new(
        confd_dir: impl Into<PathBuf>,
        main_config_path: impl Into<PathBuf>,
        effects: Arc<dyn Effects>,
    ) -> Self {
        Self {
            confd_dir: confd_dir.into(),
            main_config_path: main_config_path.into(),
            effects,
        }
    }

    /// Path the unit with this name is stored at.
    pub fn conf_path(&self, name: &str) -> PathBuf {
        self.confd_dir
            .join(format!("{}.{}", name, paths::CONF_EXTENSION))
    }

    pub fn confd_dir(&self) -> &Path {
        &self.confd_dir
    }

    pub fn main_config_path(&self) -> &Path {
        &self.main_config_path
    }

    /// Render the unit and replace its file as a whole. The previous file
    /// stays intact if anything fails.
    pub async fn upsert(&self, name: &str, config: &IngressConfig) -> Result<(), NginxError> {
        let text = template::render(nginx::INGRESS_TEMPLATE, TemplateData::Ingress(config))?;
        let path = self.conf_path(name);
        debug!("rendered configuration for '{}':\n{}", name, text);
        self.effects.write_file(&path, &text).await?;
        info!("nginx configuration '{}' written to {}", name, path.display());
        Ok(())
    }

    /// Delete the unit's file. Best-effort: a missing file is an equally
    /// acceptable end state, and other failures are logged and swallowed.
    pub async fn remove(&self, name: &str) {
        let path = self.conf_path(name);
        debug!("deleting {}", path.display());
        if let Err(e) = self.effects.remove_file(&path).await {
            warn!("failed to delete {}: {}", path.display(), e);
        }
    }

    /// Render and replace the singleton main configuration file.
    pub async fn upsert_main(&self, config: &MainConfig) -> Result<(), NginxError> {
        let text = template::render(nginx::MAIN_TEMPLATE, TemplateData::Main(config))?;
        debug!("rendered main configuration:\n{}", text);
        self.effects.write_file(&self.main_config_path, &text).await?;
        info!(
            "main nginx configuration written to {}",
            self.main_config_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DryRunEffects, HostEffects, Intent};
    use pkg_types::server::{Location, Server};
    use pkg_types::upstream::{Upstream, UpstreamServer};

    fn sample() -> IngressConfig {
        let upstream = Upstream::new("svc-a", vec![UpstreamServer::new("10.0.0.5", "8080")]);
        IngressConfig {
            upstreams: vec![upstream.clone()],
            servers: vec![Server::new("foo.example.com", vec![Location::new("/", upstream)])],
        }
    }

    fn host_sync(dir: &Path) -> ConfigSync {
        ConfigSync::new(
            dir.join("conf.d"),
            dir.join("nginx.conf"),
            Arc::new(HostEffects::new()),
        )
    }

    #[tokio::test]
    async fn upsert_round_trips_rendered_text() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("conf.d")).unwrap();
        let sync = host_sync(dir.path());
        let config = sample();

        sync.upsert("unit-a", &config).await.unwrap();

        let expected =
            template::render(nginx::INGRESS_TEMPLATE, TemplateData::Ingress(&config)).unwrap();
        let on_disk = std::fs::read_to_string(sync.conf_path("unit-a")).unwrap();
        assert_eq!(on_disk, expected);
    }

    #[tokio::test]
    async fn remove_deletes_the_unit_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("conf.d")).unwrap();
        let sync = host_sync(dir.path());

        sync.upsert("unit-a", &sample()).await.unwrap();
        assert!(sync.conf_path("unit-a").exists());

        sync.remove("unit-a").await;
        assert!(!sync.conf_path("unit-a").exists());
    }

    #[tokio::test]
    async fn remove_of_missing_unit_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("conf.d")).unwrap();
        // Must not panic or surface an error.
        host_sync(dir.path()).remove("never-existed").await;
    }

    #[tokio::test]
    async fn upsert_main_writes_the_singleton() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("conf.d")).unwrap();
        let sync = host_sync(dir.path());

        sync.upsert_main(&MainConfig::default()).await.unwrap();

        let on_disk = std::fs::read_to_string(sync.main_config_path()).unwrap();
        assert!(on_disk.contains("server_names_hash_max_size 512;"));
    }

    #[tokio::test]
    async fn dry_run_surfaces_content_instead_of_writing() {
        let dir = tempfile::tempdir().unwrap();
        let fx = Arc::new(DryRunEffects::new());
        let sync = ConfigSync::new(
            dir.path().join("conf.d"),
            dir.path().join("nginx.conf"),
            fx.clone(),
        );
        let config = sample();

        sync.upsert("unit-a", &config).await.unwrap();

        assert!(!sync.conf_path("unit-a").exists());
        let expected =
            template::render(nginx::INGRESS_TEMPLATE, TemplateData::Ingress(&config)).unwrap();
        assert_eq!(
            fx.intents(),
            vec![Intent::WriteFile {
                path: sync.conf_path("unit-a"),
                contents: expected,
            }]
        );
    }
}
