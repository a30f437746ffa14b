use anyhow::{Context, Result};
use platform_api::Endpoint;
use products_hr::DEFAULT_PREFIX;

const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: String,
    pub api_prefix: String,
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            api_url: non_blank("EMPLOYEE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            api_prefix: non_blank("EMPLOYEE_API_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.into()),
            log_filter: non_blank("RUST_LOG"),
        }
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }

    pub fn endpoint(&self) -> Result<Endpoint> {
        Endpoint::new(&self.api_url, &self.api_prefix)
            .with_context(|| format!("invalid EMPLOYEE_API_URL {}", self.api_url))
    }
}
