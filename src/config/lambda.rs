use crate::domain::ports::{
    ConfigProvider, DEFAULT_CANADIAN_URL, DEFAULT_CISA_URL, DEFAULT_RANSOMWHERE_URL,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::utils::error::{IntelError, Result};
use crate::utils::validation::{validate_provider, Validate};
use std::env;

/// 函式執行環境的配置，全部來自環境變數
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub ransomwhere_url: String,
    pub cisa_url: String,
    pub canadian_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for LambdaConfig {
    fn default() -> Self {
        Self {
            ransomwhere_url: DEFAULT_RANSOMWHERE_URL.to_string(),
            cisa_url: DEFAULT_CISA_URL.to_string(),
            canadian_url: DEFAULT_CANADIAN_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 以任意查詢函式建立，方便測試時不必修改行程環境
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| IntelError::InvalidConfigValueError {
                    field: "REQUEST_TIMEOUT_SECS".to_string(),
                    value: raw.clone(),
                    reason: "Must be a whole number of seconds".to_string(),
                })?,
            None => defaults.timeout_secs,
        };

        Ok(Self {
            ransomwhere_url: lookup("RANSOMWHERE_URL").unwrap_or(defaults.ransomwhere_url),
            cisa_url: lookup("CISA_URL").unwrap_or(defaults.cisa_url),
            canadian_url: lookup("CANADIAN_URL").unwrap_or(defaults.canadian_url),
            timeout_secs,
            user_agent: lookup("USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn ransomwhere_url(&self) -> &str {
        &self.ransomwhere_url
    }

    fn cisa_url(&self) -> &str {
        &self.cisa_url
    }

    fn canadian_url(&self) -> &str {
        &self.canadian_url
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
