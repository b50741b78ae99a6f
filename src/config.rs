use crate::errors::{AppError, Result};
use chrono::Weekday;
use std::{env, path::PathBuf, time::Duration};

pub const LOGIN: &str = "octocat";
pub const START_MARKER: &str = "<!-- STREAK-CARD:START -->";
pub const END_MARKER: &str = "<!-- STREAK-CARD:END -->";
pub const DEFAULT_API_URL: &str = "https://api.github.com/graphql";

const DEFAULT_BREAK_DAYS: [Weekday; 2] = [Weekday::Fri, Weekday::Sat];
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Weekdays that neither extend nor reset a streak when nothing was contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakDays(Vec<Weekday>);

impl BreakDays {
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut days: Vec<Weekday> = days.into_iter().collect();
        days.sort_by_key(|day| day.num_days_from_monday());
        days.dedup();
        Self(days)
    }

    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    /// Parses a comma separated list such as `fri,sat`. A blank list means no break days.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut days = Vec::new();
        for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let day = item
                .parse::<Weekday>()
                .map_err(|_| AppError::Config(format!("unknown weekday '{item}'")))?;
            days.push(day);
        }
        Ok(Self::new(days))
    }
}

impl Default for BreakDays {
    fn default() -> Self {
        Self::new(DEFAULT_BREAK_DAYS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: START_MARKER.to_string(),
            end: END_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub login: String,
    pub api_url: String,
    pub card_path: PathBuf,
    pub document_path: PathBuf,
    pub markers: Markers,
    pub break_days: BreakDays,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup("GITHUB_TOKEN")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(AppError::MissingCredential)?;

        let break_days = match lookup("STREAK_BREAK_DAYS") {
            Some(raw) => BreakDays::parse(&raw)?,
            None => BreakDays::default(),
        };

        let timeout_secs = match lookup("STREAK_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("STREAK_TIMEOUT_SECS must be a number, got '{raw}'"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            token,
            login: LOGIN.to_string(),
            api_url: lookup("STREAK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            card_path: PathBuf::from(
                lookup("STREAK_CARD_PATH").unwrap_or_else(|| "streak.svg".to_string()),
            ),
            document_path: PathBuf::from(
                lookup("STREAK_DOCUMENT_PATH").unwrap_or_else(|| "README.md".to_string()),
            ),
            markers: Markers::default(),
            break_days,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_token_is_reported() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, AppError::MissingCredential));

        let err = Config::from_lookup(lookup_from(&[("GITHUB_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, AppError::MissingCredential));
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup_from(&[("GITHUB_TOKEN", "abc")])).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.login, LOGIN);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.card_path, PathBuf::from("streak.svg"));
        assert_eq!(config.document_path, PathBuf::from("README.md"));
        assert_eq!(config.markers, Markers::default());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.break_days.contains(Weekday::Fri));
        assert!(config.break_days.contains(Weekday::Sat));
        assert!(!config.break_days.contains(Weekday::Sun));
    }

    #[test]
    fn break_days_parse_names_and_blank() {
        let days = BreakDays::parse("sat, Sunday").unwrap();
        assert_eq!(days, BreakDays::new([Weekday::Sat, Weekday::Sun]));
        assert_eq!(BreakDays::parse("").unwrap(), BreakDays::none());
        assert!(matches!(
            BreakDays::parse("fri,someday"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("GITHUB_TOKEN", "abc"),
            ("STREAK_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
