use crate::backend::Effects;
use crate::error::NginxError;
use pkg_constants::paths;
use pkg_types::certificate::CertificateBundle;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Persists TLS certificate bundles under the managed `ssl` directory.
/// One `<name>.pem` per bundle: private key, newline, certificate.
pub struct CertStore {
    certs_dir: PathBuf,
    effects: Arc<dyn Effects>,
}

impl CertStore {
    pub fn new(certs_dir: impl Into<PathBuf>, effects: Arc<dyn Effects>) -> Self {
        Self {
            certs_dir: certs_dir.into(),
            effects,
        }
    }

    /// Stable path a bundle with this name is (or would be) stored at.
    pub fn pem_path(&self, name: &str) -> PathBuf {
        self.certs_dir
            .join(format!("{}.{}", name, paths::PEM_EXTENSION))
    }

    pub fn certs_dir(&self) -> &Path {
        &self.certs_dir
    }

    /// Write the bundle, fully replacing any previous content, and return
    /// the stable path for server blocks to reference. In dry-run mode no
    /// file is written but the same path is returned so rendered output
    /// stays realistic.
    pub async fn put(&self, bundle: &CertificateBundle) -> Result<PathBuf, NginxError> {
        let path = self.pem_path(&bundle.name);
        let contents = format!("{}\n{}", bundle.key, bundle.cert);
        self.effects.write_file(&path, &contents).await?;
        info!("certificate bundle '{}' written to {}", bundle.name, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HostEffects;

    #[tokio::test]
    async fn bundle_is_key_newline_cert() {
        let dir = tempfile::tempdir().unwrap();
        let store = CertStore::new(dir.path(), Arc::new(HostEffects::new()));

        let bundle = CertificateBundle::new("site1", "CERTTEXT", "KEYTEXT");
        let path = store.put(&bundle).await.unwrap();

        assert!(path.to_string_lossy().ends_with("site1.pem"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "KEYTEXT\nCERTTEXT");
    }

    #[tokio::test]
    async fn reput_replaces_the_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let store = CertStore::new(dir.path(), Arc::new(HostEffects::new()));

        store
            .put(&CertificateBundle::new("site1", "OLDCERT", "OLDKEY"))
            .await
            .unwrap();
        let path = store
            .put(&CertificateBundle::new("site1", "NEWCERT", "NEWKEY"))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "NEWKEY\nNEWCERT");
    }

    #[tokio::test]
    async fn dry_run_returns_the_real_path_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let fx = Arc::new(crate::backend::DryRunEffects::new());
        let store = CertStore::new(dir.path(), fx.clone());

        let path = store
            .put(&CertificateBundle::new("site1", "CERT", "KEY"))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("site1.pem"));
        assert!(!path.exists());
        assert_eq!(fx.intents().len(), 1);
    }
}
