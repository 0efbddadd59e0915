use grouper::{
    tracing::{configure, LoggingOptions},
    GroupOptions,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options: LoggingOptions = match std::env::var("LOGGING_CONFIG") {
        Ok(config) => serde_json::from_str(&config)?,
        Err(_) => LoggingOptions::default(),
    };
    let logging = configure(options)?;
    let loki = logging.spawn();

    let words = ["apple", "avocado", "banana", "blueberry", "cherry", "apricot"];
    let grouped = GroupOptions::new()
        .with_key(|w: &&str| w.chars().next())
        .with_pairs(true)
        .group(words);

    info!(groups = grouped.len(), "grouped words by first letter");
    info!("{}", serde_json::to_string(&grouped)?);

    if let Some(loki) = loki {
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        loki.abort();
    }

    Ok(())
}
