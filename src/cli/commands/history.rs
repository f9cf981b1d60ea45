use crate::config::Config;
use crate::history::SearchHistory;
use anyhow::Context;

pub async fn cmd_history(config: &Config, filter: Option<&str>) -> anyhow::Result<()> {
    let history_config = config.history.clone();
    let needle = filter.map(ToString::to_string);

    let (entries, capacity) = tokio::task::spawn_blocking(move || {
        let history = SearchHistory::from_config(&history_config);
        let entries = match needle {
            Some(needle) => history.filter_history(&needle),
            None => history.get_history(),
        };
        (entries, history.capacity())
    })
    .await
    .context("History read task failed")?;

    if entries.is_empty() {
        match filter {
            Some(needle) => println!("No recent searches matching '{needle}'."),
            None => println!("No search history."),
        }
        return Ok(());
    }

    println!(
        "Recent Searches ({} of max {}):",
        entries.len(),
        capacity
    );
    println!("{:-<40}", "");

    for entry in entries {
        println!("• {entry}");
    }

    Ok(())
}
