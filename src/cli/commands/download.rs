use crate::config::Config;
use crate::services::ImageService;
use std::path::Path;

pub async fn cmd_download(config: &Config, url: &str, dir: &Path) -> anyhow::Result<()> {
    let images = ImageService::from_config(&config.unsplash);
    let path = images.download(url, dir).await?;
    println!("✓ Saved {}", path.display());
    Ok(())
}
