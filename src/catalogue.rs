//! Looks up CSV distribution URLs on the data.europa.eu catalogue.

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{MatchError, MatchResult};

/// Catalogue record of the Horizon Europe CORDIS dataset.
pub const HUB_DATASET_URL: &str = "https://data.europa.eu/api/hub/search/datasets/cordis-eu-research-projects-under-horizon-europe-2021-2027";

#[derive(Debug, Deserialize)]
struct HubResponse {
    result: HubResult,
}

#[derive(Debug, Deserialize)]
struct HubResult {
    #[serde(default)]
    distributions: Vec<Value>,
}

/// Fetches the dataset record and returns the access URLs of its CSV
/// distributions, in catalogue order.
pub async fn csv_distribution_urls(
    client: &reqwest::Client,
    dataset_url: &str,
) -> MatchResult<Vec<String>> {
    let response = client
        .get(dataset_url)
        .send()
        .await
        .map_err(|err| MatchError::unavailable(dataset_url, err))?
        .error_for_status()
        .map_err(|err| MatchError::unavailable(dataset_url, err))?;
    let body = response
        .text()
        .await
        .map_err(|err| MatchError::unavailable(dataset_url, err))?;
    let parsed: HubResponse = serde_json::from_str(&body)
        .map_err(|err| MatchError::unavailable(dataset_url, err))?;
    Ok(csv_access_urls(&parsed.result.distributions))
}

/// Distributions are loosely structured; anything mentioning "csv" anywhere
/// in the record counts, and `access_url` may be a string or a list.
fn csv_access_urls(distributions: &[Value]) -> Vec<String> {
    distributions
        .iter()
        .filter(|distribution| distribution.to_string().to_lowercase().contains("csv"))
        .filter_map(access_url)
        .collect()
}

fn access_url(distribution: &Value) -> Option<String> {
    match distribution.get("access_url")? {
        Value::String(url) => Some(url.clone()),
        Value::Array(urls) => urls.first().and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn picks_csv_distributions_only() {
        let distributions = vec![
            json!({"format": {"id": "CSV"}, "access_url": ["https://example.com/a.zip"]}),
            json!({"format": {"id": "JSON"}, "access_url": ["https://example.com/b.json"]}),
            json!({"title": "projects csv", "access_url": "https://example.com/c.csv"}),
        ];
        let urls = csv_access_urls(&distributions);
        assert_eq!(
            urls,
            ["https://example.com/a.zip", "https://example.com/c.csv"]
        );
    }

    #[test]
    fn distribution_without_access_url_is_dropped() {
        let distributions = vec![json!({"format": "csv"})];
        assert!(csv_access_urls(&distributions).is_empty());
    }
}
