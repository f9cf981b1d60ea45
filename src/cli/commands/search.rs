use crate::clients::SearchClient;
use crate::config::Config;
use crate::history::SearchHistory;
use crate::models::PhotoRecord;
use crate::services::{ImageService, ImageSize};
use anyhow::Context;
use std::path::Path;

/// Text block shown for one photo: grid caption plus detail view fields.
#[must_use]
pub fn format_photo(photo: &PhotoRecord) -> String {
    let mut out = format!("• {}", photo.id);

    let description = photo.description_or_empty();
    if !description.is_empty() {
        out.push_str(&format!("  {description}"));
    }

    out.push_str(&format!("\n  {}", photo.author_line()));
    out.push_str(&format!("\n  Preview: {}", photo.urls.regular));
    out.push_str(&format!("\n  Full:    {}", photo.urls.full));
    out
}

pub async fn cmd_search_photos(
    config: &Config,
    query: &str,
    json: bool,
    save_dir: Option<&Path>,
) -> anyhow::Result<()> {
    config.require_access_key()?;

    let history_config = config.history.clone();
    let recorded = query.to_string();
    tokio::task::spawn_blocking(move || {
        SearchHistory::from_config(&history_config).record_query(&recorded);
    })
    .await
    .context("History update task failed")?;

    let client = SearchClient::from_config(&config.unsplash);
    let photos = client
        .search_photos(query)
        .await
        .context("Failed to load photos")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&photos)?);
    } else if photos.is_empty() {
        println!("No photos found matching '{query}'");
    } else {
        println!("Search Results ({}):", photos.len());
        println!("{:-<60}", "");

        for photo in &photos {
            println!("{}", format_photo(photo));
            println!();
        }
    }

    if let Some(dir) = save_dir {
        let images = ImageService::from_config(&config.unsplash);
        for photo in &photos {
            let path = images.save_photo(photo, ImageSize::Full, dir).await?;
            if !json {
                println!("✓ Saved {}", path.display());
            }
        }
    }

    Ok(())
}
