use crate::services::validation::{self, ImageInfo, ValidationError};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Not a valid image: {0}")]
    Invalid(#[from] ValidationError),
    #[error("Failed to persist upload: {0}")]
    Persistence(#[source] io::Error),
}

/// Final path segment of a client supplied file name. Both `/` and `\` count
/// as separators so Windows style paths are stripped as well.
pub fn base_name(filename: &str) -> Option<&str> {
    let trimmed = filename.trim_end_matches(['/', '\\']);
    let name = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

pub fn target_path(upload_dir: &Path, base_name: &str) -> PathBuf {
    upload_dir.join(base_name)
}

/// Validates the spooled upload and, if it is an image, moves it to `target`.
/// Nothing is written when validation fails.
pub fn store(spooled: &Path, target: &Path) -> Result<ImageInfo, StoreError> {
    let info = validation::probe_image(spooled)?;
    persist(spooled, target).map_err(StoreError::Persistence)?;
    Ok(info)
}

/// Copies `source` next to `target` and renames it into place, so readers only
/// ever see a complete file. An existing file at `target` is replaced.
pub fn persist(source: &Path, target: &Path) -> io::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    let mut input = File::open(source)?;
    io::copy(&mut input, staged.as_file_mut())?;
    staged.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    staged.persist(target).map_err(|e| e.error)?;
    Ok(())
}
