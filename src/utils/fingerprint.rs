//! Content-hash fingerprinting of asset filenames for cache busting.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use sha2::{Digest, Sha256};

/// Bytes of the SHA-256 digest kept in the filename (32 hex characters).
const FINGERPRINT_BYTES: usize = 16;

/// Hashes the file's content and renames `name.ext` to `name.<hash>.ext`
/// (`name` to `name.<hash>` when there is no extension).
///
/// Returns the new path.
///
/// # Errors
///
/// Returns an error if the path does not point at a readable file or the
/// rename fails.
pub fn fingerprint_file(path: &Path) -> Result<PathBuf> {
    let metadata = fs::metadata(path).with_context(|| {
        format!(
            "file at path '{}' does not exist or is not accessible",
            path.display()
        )
    })?;

    if !metadata.is_file() {
        bail!("path '{}' is not a file", path.display());
    }

    let contents = fs::read(path)?;
    let digest = Sha256::digest(&contents);
    let hash = hex::encode(&digest[..FINGERPRINT_BYTES]);

    let new_path = hashed_path(path, &hash);

    fs::rename(path, &new_path)
        .with_context(|| format!("could not rename '{}'", path.display()))?;

    Ok(new_path)
}

fn hashed_path(path: &Path, hash: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match path.extension() {
        Some(ext) => format!("{}.{}.{}", stem, hash, ext.to_string_lossy()),
        None => format!("{}.{}", stem, hash),
    };

    path.with_file_name(file_name)
}
