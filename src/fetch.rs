use crate::errors::{AppError, Result};
use crate::models::ActivityDay;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use tracing::{debug, info};

/// Read side of a contribution calendar provider.
#[allow(async_fn_in_trait)]
pub trait ContributionSource {
    /// Years in which `login` has any recorded contribution.
    async fn contribution_years(&self, login: &str) -> Result<Vec<i32>>;

    /// Per-day counts for `login` within `[from, to]`.
    async fn contribution_days(
        &self,
        login: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ActivityDay>>;
}

/// Collects every reported day from the first activity year through `now`, ascending.
pub async fn fetch_day_series<S: ContributionSource>(
    source: &S,
    login: &str,
    now: DateTime<Utc>,
) -> Result<Vec<ActivityDay>> {
    let mut years = source.contribution_years(login).await?;
    if years.is_empty() {
        return Err(AppError::NoData {
            login: login.to_string(),
        });
    }
    years.sort_unstable();
    years.dedup();

    let today = now.date_naive();
    let mut days = Vec::new();
    for year in years.into_iter().filter(|year| *year <= now.year()) {
        let (from, to) = year_window(year, now)?;
        let batch = source.contribution_days(login, from, to).await?;
        debug!(year, days = batch.len(), "fetched contribution year");
        days.extend(batch);
    }

    days.retain(|day| day.date <= today);
    days.sort_by_key(|day| day.date);
    days.dedup_by_key(|day| day.date);

    info!(login, days = days.len(), "fetched contribution calendar");
    Ok(days)
}

/// Full calendar year, or Jan 1 through `now` for the current year.
pub fn year_window(year: i32, now: DateTime<Utc>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let from = start_of_day(year, 1, 1)?;
    if year == now.year() {
        return Ok((from, now));
    }

    let last_day = start_of_day(year, 12, 31)?;
    let to = last_day + chrono::Duration::seconds(86_399);
    Ok((from, to))
}

fn start_of_day(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AppError::malformed(format!("invalid contribution year {year}")))?;
    Ok(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)))
}
