//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::info;

/// Ensure the media directory exists, creating it when missing.
pub async fn ensure_env(media_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(media_dir).await.is_err() {
        info!(%media_dir, "media directory not found; creating it");
    }
    tokio::fs::create_dir_all(media_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {media_dir}: {e}"))?;
    Ok(())
}
