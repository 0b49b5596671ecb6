use crate::domain::model::{ResponseEnvelope, SourceResult, Sources};
use crate::domain::ports::{ConfigProvider, FeedSource};
use crate::sources::http::build_client;
use crate::sources::{CanadianSource, CisaSource, RansomwhereSource};
use crate::utils::error::{IntelError, Result};
use chrono::Utc;
use std::time::Instant;
use tokio::task::{JoinError, JoinHandle};

/// 每次請求同時抓取三個來源，彼此隔離，最後組成一個回應
#[derive(Debug, Clone)]
pub struct Aggregator {
    ransomwhere: RansomwhereSource,
    cisa: CisaSource,
    canadian: CanadianSource,
}

impl Aggregator {
    pub fn new(ransomwhere: RansomwhereSource, cisa: CisaSource, canadian: CanadianSource) -> Self {
        Self {
            ransomwhere,
            cisa,
            canadian,
        }
    }

    /// 三個來源共用同一個 HTTP client (連線池)
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = build_client(config)?;
        Ok(Self::new(
            RansomwhereSource::new(client.clone(), config.ransomwhere_url()),
            CisaSource::new(client.clone(), config.cisa_url()),
            CanadianSource::new(client, config.canadian_url()),
        ))
    }

    /// Never fails: each source settles into its own `SourceResult`.
    pub async fn aggregate(&self) -> ResponseEnvelope {
        tracing::info!("🔄 Fetching all ransomware intelligence feeds...");
        let started = Instant::now();

        let ransomwhere = spawn_source(self.ransomwhere.clone());
        let cisa = spawn_source(self.cisa.clone());
        let canadian = spawn_source(self.canadian.clone());

        let (ransomwhere, cisa, canadian) = tokio::join!(ransomwhere, cisa, canadian);

        let sources = Sources {
            ransomwhere: settle(self.ransomwhere.name(), ransomwhere),
            cisa: settle(self.cisa.name(), cisa),
            canadian: settle(self.canadian.name(), canadian),
        };

        tracing::info!(
            "Aggregation finished in {:?} (ransomwhere: {}, cisa: {}, canadian: {})",
            started.elapsed(),
            describe(&sources.ransomwhere),
            describe(&sources.cisa),
            describe(&sources.canadian)
        );

        ResponseEnvelope::new(Utc::now(), sources)
    }
}

fn spawn_source<S>(source: S) -> JoinHandle<Result<Vec<S::Item>>>
where
    S: FeedSource + 'static,
{
    tokio::spawn(async move { source.fetch().await })
}

/// 任務 panic 或被取消也只影響自己的來源
fn settle<T>(
    source_name: &str,
    joined: std::result::Result<Result<Vec<T>>, JoinError>,
) -> SourceResult<T> {
    let outcome = joined.unwrap_or_else(|e| {
        Err(IntelError::TaskError {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    });

    if let Err(e) = &outcome {
        tracing::warn!("❌ {} failed: {}", source_name, e);
    }

    SourceResult::from(outcome)
}

fn describe<T>(result: &SourceResult<T>) -> String {
    if result.is_success() {
        format!("{} records", result.len())
    } else {
        "error".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PaymentRecord, SourceStatus};
    use async_trait::async_trait;

    struct PanickingSource;

    #[async_trait]
    impl FeedSource for PanickingSource {
        type Item = PaymentRecord;

        fn name(&self) -> &'static str {
            "Panicky"
        }

        async fn fetch(&self) -> Result<Vec<PaymentRecord>> {
            panic!("parser blew up");
        }
    }

    #[tokio::test]
    async fn test_settle_converts_panic_into_source_error() {
        let joined = spawn_source(PanickingSource).await;
        let result = settle("Panicky", joined);

        assert_eq!(result.status, SourceStatus::Error);
        assert!(result.data.is_none());
        assert!(result.error.unwrap().starts_with("Panicky task failed"));
    }

    #[tokio::test]
    async fn test_settle_keeps_successful_data() {
        let result = settle::<u8>("Ok", Ok(Ok(vec![1, 2, 3])));

        assert!(result.is_success());
        assert_eq!(result.len(), 3);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_aggregate_with_unreachable_upstreams_still_builds_envelope() {
        let client = reqwest::Client::new();
        // 保留埠 9 (discard) 通常沒有服務，連線會立即失敗
        let aggregator = Aggregator::new(
            RansomwhereSource::new(client.clone(), "http://127.0.0.1:9/export"),
            CisaSource::new(client.clone(), "http://127.0.0.1:9/all.xml"),
            CanadianSource::new(client, "http://127.0.0.1:9/rss"),
        );

        let envelope = aggregator.aggregate().await;

        assert_eq!(envelope.sources.ransomwhere.status, SourceStatus::Error);
        assert_eq!(envelope.sources.cisa.status, SourceStatus::Error);
        assert_eq!(envelope.sources.canadian.status, SourceStatus::Error);
        assert!(envelope.timestamp.ends_with('Z'));
    }
}
