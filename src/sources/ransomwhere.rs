use crate::domain::model::PaymentRecord;
use crate::domain::ports::FeedSource;
use crate::sources::http::fetch_text;
use crate::utils::error::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;

/// 標題列之後最多讀取的資料列數
pub const MAX_DATA_ROWS: usize = 99;

/// 欄位開頭的數字部分，之後的單位或雜訊忽略 (例如 `1.5BTC`)
static AMOUNT_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("amount pattern is valid")
});

#[derive(Debug, Clone)]
pub struct RansomwhereSource {
    client: Client,
    endpoint: String,
}

impl RansomwhereSource {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl FeedSource for RansomwhereSource {
    type Item = PaymentRecord;

    fn name(&self) -> &'static str {
        "Ransomwhere"
    }

    async fn fetch(&self) -> Result<Vec<PaymentRecord>> {
        tracing::info!("🔍 Fetching Ransomwhere data...");
        let csv_data = fetch_text(&self.client, self.name(), &self.endpoint).await?;
        let payments = parse_payments(&csv_data);

        tracing::info!("✅ Ransomwhere: {} payments fetched", payments.len());
        Ok(payments)
    }
}

/// Naive comma split, not quote-aware. The row cap counts lines read, so
/// short or blank lines inside the first 99 still use up the budget.
pub fn parse_payments(csv_data: &str) -> Vec<PaymentRecord> {
    csv_data
        .trim()
        .split('\n')
        .skip(1)
        .take(MAX_DATA_ROWS)
        .filter_map(|line| {
            let columns: Vec<&str> = line.trim_end_matches('\r').split(',').collect();
            if columns.len() < 4 {
                return None;
            }

            let family = if columns[1].is_empty() {
                "Unknown"
            } else {
                columns[1]
            };

            Some(PaymentRecord {
                address: columns[0].to_string(),
                family: family.to_string(),
                amount: parse_amount(columns[2]),
                date: columns[3].to_string(),
            })
        })
        .collect()
}

fn parse_amount(raw: &str) -> f64 {
    let amount = AMOUNT_PREFIX_RE
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok());

    match amount {
        Some(amount) if amount.is_finite() && amount >= 0.0 => amount,
        _ => 0.0,
    }
}
