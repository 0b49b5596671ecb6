use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_RANSOMWHERE_URL: &str = "https://api.ransomwhe.re/export";
pub const DEFAULT_CISA_URL: &str = "https://www.cisa.gov/cybersecurity-advisories/all.xml";
pub const DEFAULT_CANADIAN_URL: &str =
    "https://cyber.gc.ca/api/cccs/rss/v1/get?feed=guidance&lang=en";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("threat-intel-aggregator/", env!("CARGO_PKG_VERSION"));

pub trait ConfigProvider: Send + Sync {
    fn ransomwhere_url(&self) -> &str;
    fn cisa_url(&self) -> &str;
    fn canadian_url(&self) -> &str;
    fn timeout_secs(&self) -> u64;
    fn user_agent(&self) -> &str;
}

/// 一個上游情資來源：抓取、檢查狀態、解析成紀錄
#[async_trait]
pub trait FeedSource: Send + Sync {
    type Item: Serialize + Send + 'static;

    /// 用於日誌與錯誤訊息的顯示名稱
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Vec<Self::Item>>;
}
