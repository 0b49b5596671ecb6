use crate::domain::model::AlertRecord;
use crate::domain::ports::FeedSource;
use crate::sources::http::fetch_text;
use crate::sources::rss;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;

pub const MAX_ALERTS: usize = 8;
pub const RECENT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone)]
pub struct CanadianSource {
    client: Client,
    endpoint: String,
}

impl CanadianSource {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeedSource for CanadianSource {
    type Item = AlertRecord;

    fn name(&self) -> &'static str {
        "Canadian"
    }

    async fn fetch(&self) -> Result<Vec<AlertRecord>> {
        tracing::info!("🔍 Fetching Canadian cyber alerts...");
        let xml_text = fetch_text(&self.client, self.name(), &self.endpoint).await?;
        let alerts = parse_alerts(&xml_text, Utc::now());

        tracing::info!("✅ Canadian: {} alerts fetched", alerts.len());
        Ok(alerts)
    }
}

/// `now` is fixed for the whole document so every item is judged against
/// the same instant.
pub fn parse_alerts(xml_text: &str, now: DateTime<Utc>) -> Vec<AlertRecord> {
    let window = Duration::days(RECENT_WINDOW_DAYS);

    rss::items(xml_text)
        .take(MAX_ALERTS)
        .map(|item| {
            let date = rss::parse_pub_date(item.pub_date);
            AlertRecord {
                title: item.title.to_string(),
                date,
                is_recent: date.map(|d| now - d < window).unwrap_or(false),
            }
        })
        .collect()
}
