//! Directory clearing for generated asset output.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Deletes every non-hidden file directly inside `dir`.
///
/// Entries whose name starts with `.` are kept, as are subdirectories.
/// Returns the number of files removed.
///
/// # Errors
///
/// Returns an error if `dir` does not exist or is not a directory, or if a
/// file cannot be removed.
pub fn clear_directory(dir: &Path) -> Result<usize> {
    let metadata = fs::metadata(dir).with_context(|| {
        format!(
            "directory at path '{}' does not exist or is not accessible",
            dir.display()
        )
    })?;

    if !metadata.is_dir() {
        bail!("path '{}' is not a directory", dir.display());
    }

    let mut removed = 0;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();

        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        if entry.file_type()?.is_file() {
            fs::remove_file(entry.path())
                .with_context(|| format!("could not delete '{}'", entry.path().display()))?;
            debug!(path = %entry.path().display(), "deleted");
            removed += 1;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("login-client-clear-{}-{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn removes_plain_files_keeps_hidden_and_dirs() {
        let dir = temp_dir("mixed");
        fs::write(dir.join("main.css"), "body{}").unwrap();
        fs::write(dir.join("app.js"), "//").unwrap();
        fs::write(dir.join(".gitkeep"), "").unwrap();
        fs::create_dir_all(dir.join("nested")).unwrap();

        let removed = clear_directory(&dir).unwrap();

        assert_eq!(removed, 2);
        assert!(dir.join(".gitkeep").exists());
        assert!(dir.join("nested").exists());
        assert!(!dir.join("main.css").exists());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let missing = env::temp_dir().join("login-client-definitely-missing");
        assert!(clear_directory(&missing).is_err());
    }

    #[test]
    fn file_path_is_an_error() {
        let dir = temp_dir("notadir");
        let file = dir.join("plain.txt");
        fs::write(&file, "x").unwrap();

        assert!(clear_directory(&file).is_err());

        let _ = fs::remove_dir_all(dir);
    }
}
