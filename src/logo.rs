//! Company logo lookup against the Logo.dev image API.
//!
//! Logo.dev serves a generic lettermark when it has no real logo for a
//! domain. Those placeholders are tiny (~2-4KB), so anything under the
//! configured threshold is discarded. All failures degrade to "no logo".

use std::time::Duration;

use anyhow::{Context, Result};

/// Logo.dev request parameters plus the placeholder-size threshold.
#[derive(Debug, Clone)]
pub struct LogoConfig {
    pub base_url: String,
    pub token: String,
    pub size: u32,
    pub format: String,
    pub theme: String,
    /// Responses smaller than this are treated as fallback placeholders.
    pub min_bytes: u64,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            base_url: "https://img.logo.dev".to_string(),
            token: "pk_KV9Z5AZ6RKGwJDRsWiv80g".to_string(),
            size: 120,
            format: "png".to_string(),
            theme: "light".to_string(),
            min_bytes: 5000,
        }
    }
}

/// Logo.dev client.
pub struct LogoFetcher {
    config: LogoConfig,
    http: reqwest::Client,
}

impl LogoFetcher {
    pub fn new(config: LogoConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build logo HTTP client")?;
        Ok(Self { config, http })
    }

    /// Fetch a usable logo URL for a domain. Never fails: non-2xx responses,
    /// undersized placeholder payloads, and network errors all yield `None`.
    pub async fn fetch(&self, domain: &str) -> Option<String> {
        match self.check(domain).await {
            Ok(found) => found,
            Err(e) => {
                tracing::info!(%domain, error = %e, "Logo check failed");
                None
            }
        }
    }

    async fn check(&self, domain: &str) -> Result<Option<String>> {
        let url = self.logo_url(domain);
        tracing::debug!(%domain, %url, "Checking logo");

        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            tracing::info!(%domain, status = %resp.status(), "No logo found");
            return Ok(None);
        }

        // Fetch the image to tell a real logo from a lettermark placeholder.
        let bytes = resp.bytes().await?;
        if (bytes.len() as u64) < self.config.min_bytes {
            tracing::info!(
                %domain,
                bytes = bytes.len(),
                threshold = self.config.min_bytes,
                "Fallback logo detected, skipping"
            );
            return Ok(None);
        }

        tracing::info!(%domain, %url, "Logo found");
        Ok(Some(url))
    }

    fn logo_url(&self, domain: &str) -> String {
        format!(
            "{}/{}?token={}&size={}&format={}&theme={}",
            self.config.base_url,
            domain,
            self.config.token,
            self.config.size,
            self.config.format,
            self.config.theme,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_all_parameters() {
        let fetcher = LogoFetcher::new(LogoConfig::default()).unwrap();
        let url = fetcher.logo_url("google.com");
        assert!(url.starts_with("https://img.logo.dev/google.com?token="));
        assert!(url.contains("&size=120"));
        assert!(url.contains("&format=png"));
        assert!(url.contains("&theme=light"));
    }
}
