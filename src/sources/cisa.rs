use crate::domain::model::AdvisoryRecord;
use crate::domain::ports::FeedSource;
use crate::sources::http::fetch_text;
use crate::sources::rss::{self, RssItem};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

pub const MAX_ADVISORIES: usize = 10;
pub const DESCRIPTION_LIMIT: usize = 200;
const RANSOM_KEYWORD: &str = "ransom";

#[derive(Debug, Clone)]
pub struct CisaSource {
    client: Client,
    endpoint: String,
}

impl CisaSource {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeedSource for CisaSource {
    type Item = AdvisoryRecord;

    fn name(&self) -> &'static str {
        "CISA"
    }

    async fn fetch(&self) -> Result<Vec<AdvisoryRecord>> {
        tracing::info!("🔍 Fetching CISA advisories...");
        let xml_text = fetch_text(&self.client, self.name(), &self.endpoint).await?;
        let advisories = parse_advisories(&xml_text);

        tracing::info!("✅ CISA: {} advisories fetched", advisories.len());
        Ok(advisories)
    }
}

pub fn parse_advisories(xml_text: &str) -> Vec<AdvisoryRecord> {
    rss::items(xml_text)
        .take(MAX_ADVISORIES)
        .map(to_advisory)
        .collect()
}

fn to_advisory(item: RssItem<'_>) -> AdvisoryRecord {
    let description = item.description.unwrap_or_default();
    let date = rss::parse_pub_date(item.pub_date);
    if date.is_none() {
        tracing::debug!("Unparsable CISA pubDate: {:?}", item.pub_date);
    }

    AdvisoryRecord {
        title: item.title.to_string(),
        date,
        description: truncate_description(description),
        is_ransomware: mentions_ransom(item.title) || mentions_ransom(description),
    }
}

/// 截到前 200 個字元，並且一律補上 "..."
pub fn truncate_description(description: &str) -> String {
    let mut truncated: String = description.chars().take(DESCRIPTION_LIMIT).collect();
    truncated.push_str("...");
    truncated
}

fn mentions_ransom(text: &str) -> bool {
    text.to_lowercase().contains(RANSOM_KEYWORD)
}
