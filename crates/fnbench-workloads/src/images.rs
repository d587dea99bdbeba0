use anyhow::{Context, Result};
use fnbench_core::InputCatalog;
use std::path::{Path, PathBuf};

/// A directory of sample images shared by the image workloads.
#[derive(Clone, Debug)]
pub(crate) struct ImageDir {
    dir: PathBuf,
}

impl ImageDir {
    /// Check up front that every catalog entry and every tagged input is
    /// present, so a missing sample fails the start-up and not a call.
    pub(crate) fn open(dir: &Path, catalog: &InputCatalog) -> Result<Self> {
        let this = Self {
            dir: dir.to_owned(),
        };

        let tagged = catalog.tags().map(|(_, input)| input);
        for name in catalog.inputs().chain(tagged) {
            let path = this.path(name);
            if !path.is_file() {
                anyhow::bail!("missing sample image {:?}", path);
            }
        }

        Ok(this)
    }

    pub(crate) fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub(crate) fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path(name);
        std::fs::read(&path).with_context(|| format!("failed reading image {:?}", path))
    }
}
