use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tempfile::NamedTempFile;

use crate::error::StoreResult;
use crate::traits::{ensure_canonical_key, BlobBackend, PutStatus};

const TEMP_PREFIX: &str = ".upload-";

/// Filesystem blob backend.
///
/// Blobs live at `{root}/{key[..2]}/{key}`. A write streams into a temp file
/// in the destination shard, syncs it, then links it into place with a
/// no-clobber rename. Readers therefore only ever see complete blobs, and an
/// interrupted write leaves at most an unreferenced `.upload-*` temp file.
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    /// Open a backend rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a key is stored at. The key is re-validated first, so the result
    /// is always strictly inside the root.
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        ensure_canonical_key(key)?;
        Ok(self.root.join(&key[..2]).join(key))
    }
}

impl BlobBackend for FsBackend {
    fn name(&self) -> &'static str {
        "fs"
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.path_for(key)?.try_exists()?)
    }

    fn read(&self, key: &str) -> StoreResult<Option<Bytes>> {
        match fs::read(self.path_for(key)?) {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_if_absent(&self, key: &str, data: &[u8]) -> StoreResult<PutStatus> {
        let path = self.path_for(key)?;
        if path.try_exists()? {
            return Ok(PutStatus::AlreadyExists);
        }
        let temp = self.stage(&self.root.join(&key[..2]), data)?;
        Self::commit(temp, &path)
    }
}

impl FsBackend {
    /// Write `data` to a synced temp file in `shard`. The file is deleted on
    /// drop unless committed.
    fn stage(&self, shard: &Path, data: &[u8]) -> StoreResult<NamedTempFile> {
        fs::create_dir_all(shard)?;
        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(shard)?;
        temp.write_all(data)?;
        temp.as_file().sync_all()?;
        Ok(temp)
    }

    /// Link a staged file into place without replacing an existing blob.
    fn commit(temp: NamedTempFile, path: &Path) -> StoreResult<PutStatus> {
        // On error the temp file is dropped, and so removed, with the PersistError.
        match temp.persist_noclobber(path) {
            Ok(_) => Ok(PutStatus::Stored),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(PutStatus::AlreadyExists),
            Err(e) => Err(e.error.into()),
        }
    }
}
