use crate::config::toml_config::TomlConfig;
use crate::domain::ports::{
    ConfigProvider, DEFAULT_CANADIAN_URL, DEFAULT_CISA_URL, DEFAULT_RANSOMWHERE_URL,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::utils::error::Result;
use crate::utils::validation::{validate_provider, Validate};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "threat-intel")]
#[command(about = "Aggregate ransomware threat-intelligence feeds into one JSON document")]
pub struct CliConfig {
    /// Ransomwhere CSV export endpoint
    #[arg(long, env = "RANSOMWHERE_URL")]
    pub ransomwhere_url: Option<String>,

    /// CISA advisories RSS endpoint
    #[arg(long, env = "CISA_URL")]
    pub cisa_url: Option<String>,

    /// Canadian Centre for Cyber Security guidance RSS endpoint
    #[arg(long, env = "CANADIAN_URL")]
    pub canadian_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// TOML file supplying values not given on the command line
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the envelope to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Pretty-print the JSON output")]
    pub pretty: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory per phase")]
    pub monitor: bool,
}

impl CliConfig {
    /// 命令列優先，檔案只補上未指定的值
    pub fn apply_file_defaults(&mut self, file: &TomlConfig) {
        let sources = &file.sources;
        if self.ransomwhere_url.is_none() {
            self.ransomwhere_url = sources.ransomwhere_url.clone();
        }
        if self.cisa_url.is_none() {
            self.cisa_url = sources.cisa_url.clone();
        }
        if self.canadian_url.is_none() {
            self.canadian_url = sources.canadian_url.clone();
        }
        if self.timeout_secs.is_none() {
            self.timeout_secs = file.http.timeout_seconds;
        }
        if self.user_agent.is_none() {
            self.user_agent = file.http.user_agent.clone();
        }
    }
}

impl ConfigProvider for CliConfig {
    fn ransomwhere_url(&self) -> &str {
        self.ransomwhere_url
            .as_deref()
            .unwrap_or(DEFAULT_RANSOMWHERE_URL)
    }

    fn cisa_url(&self) -> &str {
        self.cisa_url.as_deref().unwrap_or(DEFAULT_CISA_URL)
    }

    fn canadian_url(&self) -> &str {
        self.canadian_url.as_deref().unwrap_or(DEFAULT_CANADIAN_URL)
    }

    fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        tracing::debug!("✅ CLI configuration validation passed");
        Ok(())
    }
}

/// 將輸出寫入檔案，必要時建立上層目錄
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, contents)?;
    Ok(())
}
