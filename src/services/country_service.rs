use crate::utils::error::AppError;
use serde_json::Value;
use std::cmp::Ordering;
use std::time::Duration;

/// The upstream pages its results; one request with this limit covers every country.
const PAGE_LIMIT: &str = "500";

pub struct CountryClient {
    http: reqwest::Client,
    url: String,
}

impl CountryClient {
    pub fn new(url: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    /// Country names from the upstream list, sorted A-Z.
    pub async fn fetch_country_names(&self) -> Result<Vec<String>, AppError> {
        log::info!("🌍 Fetching countries from {}", self.url);

        let response = self
            .http
            .get(&self.url)
            .query(&[("limit", PAGE_LIMIT)])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to fetch countries: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Country API error: {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse country list: {}", e)))?;

        extract_country_names(&body)
    }
}

/// Pulls `data.*.country` out of the upstream payload. `data` is usually an
/// object keyed by ISO code; an array is accepted too.
pub fn extract_country_names(body: &Value) -> Result<Vec<String>, AppError> {
    let entries: Vec<&Value> = match body.get("data") {
        Some(Value::Object(map)) => map.values().collect(),
        Some(Value::Array(items)) => items.iter().collect(),
        _ => {
            return Err(AppError::Upstream(
                "Country list has no data member".into(),
            ))
        }
    };

    let mut names: Vec<String> = entries
        .into_iter()
        .filter_map(|entry| entry.get("country").and_then(Value::as_str))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    names.sort_by(|a, b| compare_names(a, b));
    names.dedup();
    Ok(names)
}

/// Case- and accent-insensitive order, ties broken by the raw string.
fn compare_names(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

fn sort_key(name: &str) -> String {
    name.chars().flat_map(|c| fold_char(c).to_lowercase()).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'À'..='Å' | 'à'..='å' => 'a',
        'Ç' | 'ç' => 'c',
        'È'..='Ë' | 'è'..='ë' => 'e',
        'Ì'..='Ï' | 'ì'..='ï' => 'i',
        'Ñ' | 'ñ' => 'n',
        'Ò'..='Ö' | 'Ø' | 'ò'..='ö' | 'ø' => 'o',
        'Ù'..='Ü' | 'ù'..='ü' => 'u',
        'Ý' | 'ý' | 'ÿ' => 'y',
        _ => c,
    }
}
