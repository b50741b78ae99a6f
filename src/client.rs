//! GitHub GraphQL client for contribution calendars.

use crate::config::Config;
use crate::errors::{AppError, Result};
use crate::fetch::ContributionSource;
use crate::models::{
    ActivityDay, CalendarCollection, GraphqlRequest, GraphqlResponse, UserData, YearsCollection,
};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

const YEARS_QUERY: &str = r#"query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionYears
    }
  }
}"#;

const CALENDAR_QUERY: &str = r#"query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}"#;

#[derive(Debug, Serialize)]
struct LoginVariables<'a> {
    login: &'a str,
}

#[derive(Debug, Serialize)]
struct RangeVariables<'a> {
    login: &'a str,
    from: String,
    to: String,
}

pub struct GithubClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("streak-card"));
        let mut auth = HeaderValue::from_str(&format!("bearer {}", config.token))
            .map_err(|err| AppError::Config(format!("invalid GITHUB_TOKEN: {err}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| AppError::Config(format!("failed to create HTTP client: {err}")))?;

        Ok(Self {
            http_client,
            api_url: config.api_url.clone(),
        })
    }

    async fn query<V: Serialize, T: DeserializeOwned>(
        &self,
        query: &str,
        variables: V,
    ) -> Result<T> {
        let response = self
            .http_client
            .post(&self.api_url)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await
            .map_err(|err| AppError::fetch(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppError::fetch(format!("failed to read response body: {err}")))?;
        debug!(%status, bytes = body.len(), "graphql response");

        if !status.is_success() {
            return Err(AppError::fetch(format!("API error ({status}): {body}")));
        }

        decode_response(&body)
    }
}

/// Decodes a GraphQL envelope, surfacing embedded `errors` as fetch failures.
pub fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: GraphqlResponse<T> = serde_json::from_str(body)
        .map_err(|err| AppError::malformed(format!("invalid JSON payload: {err}")))?;

    if !envelope.errors.is_empty() {
        let messages: Vec<&str> = envelope
            .errors
            .iter()
            .map(|error| error.message.as_str())
            .collect();
        return Err(AppError::fetch(format!("API error: {}", messages.join("; "))));
    }

    envelope
        .data
        .ok_or_else(|| AppError::malformed("response has no data"))
}

pub fn years_from(data: UserData<YearsCollection>) -> Result<Vec<i32>> {
    data.user
        .and_then(|user| user.contributions_collection)
        .and_then(|collection| collection.contribution_years)
        .ok_or_else(|| AppError::malformed("missing user.contributionsCollection.contributionYears"))
}

pub fn days_from(data: UserData<CalendarCollection>) -> Result<Vec<ActivityDay>> {
    let calendar = data
        .user
        .and_then(|user| user.contributions_collection)
        .and_then(|collection| collection.contribution_calendar)
        .ok_or_else(|| AppError::malformed("missing user.contributionsCollection.contributionCalendar"))?;

    Ok(calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .map(ActivityDay::from)
        .collect())
}

impl ContributionSource for GithubClient {
    async fn contribution_years(&self, login: &str) -> Result<Vec<i32>> {
        let data = self.query(YEARS_QUERY, LoginVariables { login }).await?;
        years_from(data)
    }

    async fn contribution_days(
        &self,
        login: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ActivityDay>> {
        let variables = RangeVariables {
            login,
            from: from.to_rfc3339_opts(SecondsFormat::Secs, true),
            to: to.to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        let data = self.query(CALENDAR_QUERY, variables).await?;
        days_from(data)
    }
}
