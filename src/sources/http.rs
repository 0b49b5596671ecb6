use crate::domain::ports::ConfigProvider;
use crate::utils::error::{IntelError, Result};
use reqwest::Client;
use std::time::Duration;

pub fn build_client<C: ConfigProvider + ?Sized>(config: &C) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs()))
        .user_agent(config.user_agent())
        .build()?;
    Ok(client)
}

/// GET 並回傳文字內容；非 2xx 狀態直接視為該來源失敗
pub async fn fetch_text(client: &Client, source_name: &str, url: &str) -> Result<String> {
    tracing::debug!("Making request to {}: {}", source_name, url);
    let response = client.get(url).send().await?;
    let status = response.status();

    tracing::debug!("{} response status: {}", source_name, status);

    if !status.is_success() {
        return Err(IntelError::FetchError {
            source_name: source_name.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.text().await?)
}
