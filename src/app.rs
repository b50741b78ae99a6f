use crate::card::render_card;
use crate::config::Config;
use crate::errors::Result;
use crate::fetch::{ContributionSource, fetch_day_series};
use crate::models::StreakStats;
use crate::stats::build_stats;
use crate::storage::{load_document, patch_document, persist_text};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

/// Fetches, aggregates, renders, and patches. Nothing is written unless every
/// earlier step succeeded.
pub async fn run<S: ContributionSource>(
    config: &Config,
    source: &S,
    now: DateTime<Utc>,
) -> Result<StreakStats> {
    let days = fetch_day_series(source, &config.login, now).await?;
    let stats = build_stats(&days, &config.break_days);
    info!(
        total = stats.total,
        longest = stats.longest_streak,
        current = stats.current_streak,
        "computed streak stats"
    );

    let svg = render_card(&stats);
    let document = load_document(&config.document_path).await?;
    let patched = patch_document(
        &config.document_path,
        &document,
        &config.markers,
        &card_reference(config),
    )?;

    persist_text(&config.card_path, &svg).await?;
    persist_text(&config.document_path, &patched).await?;
    info!(
        card = %config.card_path.display(),
        document = %config.document_path.display(),
        "updated streak card"
    );

    Ok(stats)
}

/// Path of the card as seen from the document's directory.
fn card_reference(config: &Config) -> PathBuf {
    let base = config.document_path.parent().unwrap_or(Path::new(""));
    match config.card_path.strip_prefix(base) {
        Ok(relative) if !base.as_os_str().is_empty() => relative.to_path_buf(),
        _ => config.card_path.clone(),
    }
}
