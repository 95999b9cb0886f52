use crate::config::loader::Config;

/// Prepares the upload directory at startup. The upload handler itself never
/// creates it; a missing directory surfaces as a persistence failure.
pub async fn init_fs(config: &Config) -> std::io::Result<()> {
    if !config.create_upload_dir {
        if !config.upload_dir.is_dir() {
            tracing::warn!(
                "upload directory {} does not exist - uploads will fail",
                config.upload_dir.display()
            );
        }
        return Ok(());
    }

    match tokio::fs::create_dir(&config.upload_dir).await {
        Ok(_) => tracing::info!("created uploads directory"),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            tracing::warn!("uploads directory exists - using it")
        }
        Err(e) => return Err(e),
    };
    Ok(())
}
