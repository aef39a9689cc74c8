//! Environment/runtime helpers
//!
//! Sanity checks on the files the service expects at startup.

use std::path::Path;

use tracing::warn;

/// Check that the initial vehicle data file exists.
///
/// A missing file is not fatal: the caller starts with an empty store.
/// Any other metadata failure (permissions, broken mount) is reported.
pub async fn ensure_data_file(path: impl AsRef<Path>) -> anyhow::Result<bool> {
    let path = path.as_ref();
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(true),
        Ok(_) => Err(anyhow::anyhow!("{} is not a regular file", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                path = %path.display(),
                "vehicle data file not found; starting with an empty store"
            );
            Ok(false)
        }
        Err(e) => Err(anyhow::anyhow!("cannot stat {}: {e}", path.display())),
    }
}
