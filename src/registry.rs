//! PyPI metadata client

use crate::pip::OperationReport;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Single message every fetch failure collapses to; the user never sees
/// transport details.
pub const FETCH_ERROR: &str = "Error fetching package details.";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("registry returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    info: ProjectInfo,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectInfo {
    name: Option<String>,
    version: Option<String>,
    summary: Option<String>,
    author: Option<String>,
    #[serde(default)]
    project_urls: Option<HashMap<String, Option<String>>>,
}

/// Metadata of one package, with every absent field already defaulted.
#[derive(Debug, Clone)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub summary: String,
    pub author: String,
    pub documentation: String,
    pub source_url: String,
}

impl PackageMetadata {
    fn from_info(info: ProjectInfo, source_url: String) -> Self {
        let documentation = info
            .project_urls
            .and_then(|urls| urls.get("Documentation").cloned().flatten())
            .unwrap_or_else(|| "No documentation available".to_string());
        Self {
            name: info.name.unwrap_or_else(|| "Unknown".to_string()),
            version: info.version.unwrap_or_else(|| "Unknown".to_string()),
            summary: info
                .summary
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "No description available.".to_string()),
            author: info
                .author
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            documentation,
            source_url,
        }
    }

    pub fn report(&self) -> String {
        format!(
            "Package Name: {}\n\
             Version: {}\n\
             Description: {}\n\
             Author: {}\n\
             Documentation: {}\n\
             Source: {}",
            self.name, self.version, self.summary, self.author, self.documentation,
            self.source_url
        )
    }
}

pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RegistryClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub async fn fetch(&self, name: &str) -> Result<PackageMetadata, RegistryError> {
        let url = format!(
            "{}/pypi/{}/json",
            self.base_url.trim_end_matches('/'),
            name
        );
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(RegistryError::Status(response.status()));
        }
        let body: ProjectResponse = response.json().await?;
        Ok(PackageMetadata::from_info(body.info, url))
    }

    /// UI-facing wrapper: formats the metadata on success and collapses
    /// every failure to [`FETCH_ERROR`].
    pub async fn fetch_report(&self, name: &str) -> OperationReport {
        match self.fetch(name).await {
            Ok(meta) => OperationReport::ok(format!(
                "Fetching package information for {name}...\n{}",
                meta.report()
            )),
            Err(e) => {
                log::warn!("registry fetch for {name} failed: {e}");
                OperationReport::err(FETCH_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ProjectInfo {
        serde_json::from_str::<ProjectResponse>(json).unwrap().info
    }

    #[test]
    fn full_response_maps_every_field() {
        let info = parse(
            r#"{"info":{"name":"requests","version":"2.31.0",
                "summary":"Python HTTP for Humans.","author":"Kenneth Reitz",
                "project_urls":{"Documentation":"https://requests.readthedocs.io"}}}"#,
        );
        let meta = PackageMetadata::from_info(
            info,
            "https://pypi.org/pypi/requests/json".to_string(),
        );
        assert_eq!(meta.name, "requests");
        assert_eq!(meta.version, "2.31.0");
        assert_eq!(meta.documentation, "https://requests.readthedocs.io");
    }

    #[test]
    fn absent_fields_fall_back_to_placeholders() {
        let info = parse(r#"{"info":{"name":"mystery"}}"#);
        let meta = PackageMetadata::from_info(info, "url".to_string());
        assert_eq!(meta.version, "Unknown");
        assert_eq!(meta.summary, "No description available.");
        assert_eq!(meta.author, "Unknown");
        assert_eq!(meta.documentation, "No documentation available");
    }

    #[test]
    fn null_project_urls_entry_is_treated_as_absent() {
        let info = parse(
            r#"{"info":{"name":"x","project_urls":{"Documentation":null}}}"#,
        );
        let meta = PackageMetadata::from_info(info, "url".to_string());
        assert_eq!(meta.documentation, "No documentation available");
    }

    #[tokio::test]
    async fn fetch_failure_collapses_to_generic_message() {
        // nothing listens on port 1, so the request fails at connect
        let client = RegistryClient::new("http://127.0.0.1:1".to_string(), 1);
        let report = client.fetch_report("requests").await;
        assert!(!report.success);
        assert_eq!(report.text, FETCH_ERROR);
    }

    #[test]
    fn report_echoes_the_source_url() {
        let info = parse(r#"{"info":{"name":"requests","version":"2.31.0"}}"#);
        let url = "https://pypi.org/pypi/requests/json";
        let meta = PackageMetadata::from_info(info, url.to_string());
        let report = meta.report();
        assert!(report.starts_with("Package Name: requests"));
        assert!(report.ends_with(&format!("Source: {url}")));
    }
}
