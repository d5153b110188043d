//! Seeding a mock account from a directory tree.
//!
//! The loader is an injected collaborator: [`MockAccount`] calls whatever
//! [`SeedLoader`] it was built with and treats its failure as opaque.
//!
//! [`OnFileLoader`] maps a directory tree onto the store:
//!
//! ```text
//! root/
//!   photos/            -> container "photos"
//!     2024/beach.jpg   -> object "2024/beach.jpg"
//!   docs/              -> container "docs"
//!     readme.txt       -> object "readme.txt"
//!   stray.txt          (ignored: not inside a container directory)
//! ```

use std::path::Path;

use anyhow::{anyhow, bail, Context};
use tracing::debug;
use walkdir::WalkDir;

use crate::mock::MockAccount;
use crate::traits::{Account, Container, StoredObject};

/// Populates a mock account from an external source.
pub trait SeedLoader: Send + Sync {
    fn create_containers(&self, account: &MockAccount, root: &Path) -> anyhow::Result<()>;
}

/// Loads containers and objects from the filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnFileLoader;

impl SeedLoader for OnFileLoader {
    fn create_containers(&self, account: &MockAccount, root: &Path) -> anyhow::Result<()> {
        if !root.is_dir() {
            bail!("seed root is not a directory: {}", root.display());
        }

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let name = entry
                .file_name()
                .to_str()
                .ok_or_else(|| anyhow!("container name is not UTF-8: {}", entry.path().display()))?;

            let container = account.container(name);
            if !container.exists()? {
                container.create()?;
            }
            let loaded = load_objects(&container, entry.path())?;
            debug!(container = name, objects = loaded, "container seeded");
        }
        Ok(())
    }
}

fn load_objects(container: &impl Container, dir: &Path) -> anyhow::Result<usize> {
    let mut loaded = 0;
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = object_name(entry.path().strip_prefix(dir)?)?;
        let content = std::fs::read(entry.path())
            .with_context(|| format!("reading {}", entry.path().display()))?;
        container.object(&name).upload_object(&content)?;
        loaded += 1;
    }
    Ok(loaded)
}

/// `/`-joined relative path, independent of the host separator.
fn object_name(relative: &Path) -> anyhow::Result<String> {
    let parts = relative
        .components()
        .map(|part| {
            part.as_os_str()
                .to_str()
                .ok_or_else(|| anyhow!("object name is not UTF-8: {}", relative.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}
