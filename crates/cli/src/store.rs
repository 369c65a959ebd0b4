//! JSON file-backed target store
//!
//! Specifications live at `<root>/<namespace>/<name>.json`. The store is
//! meant for one-shot CLI runs and tests; a live deployment plugs a real
//! API-backed store into the same trait.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use reconciler_lib::{TargetSpec, TargetStore};

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, namespace: &str, name: &str) -> PathBuf {
        self.root.join(namespace).join(format!("{}.json", name))
    }
}

#[async_trait]
impl TargetStore for FileStore {
    async fn fetch(&self, namespace: &str, name: &str) -> Result<TargetSpec> {
        let path = self.path_for(namespace, name);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("read target specification from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parse target specification in {}", path.display()))
    }

    async fn persist(&self, spec: &TargetSpec) -> Result<()> {
        let path = self.path_for(&spec.namespace, &spec.name);
        let raw = serde_json::to_string_pretty(spec)?;
        tokio::fs::write(&path, raw)
            .await
            .with_context(|| format!("write target specification to {}", path.display()))
    }
}
