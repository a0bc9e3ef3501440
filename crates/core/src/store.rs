//! Persistence capability for generated modules.

use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;
use tracing::debug;

use crate::error::StoreError;

/// Where generated module text ends up.
///
/// Both operations overwrite on conflict.
pub trait ModuleStore: Send + Sync {
    /// Create `dir` and any missing parents.
    fn ensure_dir<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, Result<(), StoreError>>;

    /// Write `contents` to `path`, replacing any existing file.
    fn write_text<'a>(
        &'a self,
        path: &'a Path,
        contents: String,
    ) -> BoxFuture<'a, Result<(), StoreError>>;
}

/// [`ModuleStore`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsModuleStore;

impl ModuleStore for FsModuleStore {
    fn ensure_dir<'a>(&'a self, dir: &'a Path) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| StoreError::CreateDir {
                    path: dir.to_path_buf(),
                    source,
                })
        })
    }

    fn write_text<'a>(
        &'a self,
        path: &'a Path,
        contents: String,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            let len = contents.len();
            tokio::fs::write(path, contents)
                .await
                .map_err(|source| StoreError::Write {
                    path: PathBuf::from(path),
                    source,
                })?;
            debug!(path = %path.display(), len, "Wrote module.");
            Ok(())
        })
    }
}
