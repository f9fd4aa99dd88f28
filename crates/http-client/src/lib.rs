use std::time::Duration;

use eyre::WrapErr;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Url;

use models::config::WebhookConfig;
use models::{DailyCount, LeaderboardPayload, LeaderboardRow, Series, SeriesPayload};

const LEADERBOARD_PATH: &str = "leaderboard";

#[derive(Debug, Clone)]
pub struct WebhookClient {
    base_url: String,
    client: reqwest::Client,
}

impl WebhookClient {
    pub fn new(config: &WebhookConfig) -> eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .wrap_err("build reqwest client")?;

        Ok(Self::with_client(&config.base_url, client))
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn series_url(&self, series: Series, person_id: Option<&str>) -> eyre::Result<Url> {
        endpoint_url(&self.base_url, series.as_str(), person_id)
    }

    pub async fn fetch_series(
        &self,
        series: Series,
        person_id: Option<&str>,
    ) -> eyre::Result<Vec<DailyCount>> {
        let url = self.series_url(series, person_id)?;
        let bytes = self.get_bytes(&url).await?;
        let samples = decode_series(&bytes).wrap_err_with(|| format!("decode {series} series"))?;
        tracing::debug!(%series, samples = samples.len(), "fetched series");
        Ok(samples)
    }

    pub async fn fetch_leaderboard(&self) -> eyre::Result<Vec<LeaderboardRow>> {
        let url = endpoint_url(&self.base_url, LEADERBOARD_PATH, None)?;
        let bytes = self.get_bytes(&url).await?;
        let rows = decode_leaderboard(&bytes).wrap_err("decode leaderboard")?;
        tracing::debug!(rows = rows.len(), "fetched leaderboard");
        Ok(rows)
    }

    async fn get_bytes(&self, url: &Url) -> eyre::Result<Vec<u8>> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .wrap_err_with(|| format!("GET {url}"))?;
        let status = resp.status();
        let final_url = resp.url().clone();
        let bytes = resp.bytes().await.wrap_err("read response bytes")?;
        if !status.is_success() {
            return Err(eyre::eyre!("non-success status: {status} url={final_url}"));
        }
        Ok(bytes.to_vec())
    }
}

fn endpoint_url(base_url: &str, path: &str, person_id: Option<&str>) -> eyre::Result<Url> {
    let mut raw = format!("{base_url}/{path}");
    if let Some(person_id) = person_id {
        raw.push_str("?person_id=");
        raw.push_str(&urlencoding::encode(person_id));
    }
    Url::parse(&raw).wrap_err_with(|| format!("parse webhook url: {raw}"))
}

pub fn decode_series(bytes: &[u8]) -> eyre::Result<Vec<DailyCount>> {
    let payload: SeriesPayload = serde_json::from_slice(bytes).wrap_err("parse series json")?;
    Ok(payload.into_samples())
}

pub fn decode_leaderboard(bytes: &[u8]) -> eyre::Result<Vec<LeaderboardRow>> {
    let payload: LeaderboardPayload =
        serde_json::from_slice(bytes).wrap_err("parse leaderboard json")?;
    Ok(payload.into_rows())
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        HeaderValue::from_static(concat!("minestats/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static("application/json"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> WebhookClient {
        WebhookClient::with_client(base, reqwest::Client::new())
    }

    #[test]
    fn series_urls() {
        let c = client("https://hooks.example.com/webhook/");
        assert_eq!(
            c.series_url(Series::Users, None).unwrap().as_str(),
            "https://hooks.example.com/webhook/users"
        );
        assert_eq!(
            c.series_url(Series::Referrals, Some("ab c&d")).unwrap().as_str(),
            "https://hooks.example.com/webhook/referrals?person_id=ab%20c%26d"
        );
    }

    #[test]
    fn bad_base_url_is_an_error() {
        assert!(client("not a url").series_url(Series::Pools, None).is_err());
    }

    #[test]
    fn decodes_series_shapes() {
        let bare = decode_series(br#"[{"date":"01.01.24","count":"3"}]"#).unwrap();
        assert_eq!(bare, vec![DailyCount::new("01.01.24", 3)]);

        let wrapped = decode_series(br#"{"data":[{"date":"01.01.24","count":3}]}"#).unwrap();
        assert_eq!(wrapped, bare);

        assert!(decode_series(br#"{"rows":[]}"#).is_err());
    }

    #[test]
    fn decodes_leaderboard() {
        let rows = decode_leaderboard(
            br#"[{"person_id":"7","name":"miner","th":"936"},{"person_id":8,"th":12.5}]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name.as_deref(), Some("miner"));
        assert_eq!(rows[0].th, 936.0);
        assert_eq!(rows[1].person_id, "8");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_reported() {
        let c = client("http://127.0.0.1:9");
        let err = c.fetch_series(Series::Users, None).await.unwrap_err();
        assert!(format!("{err:#}").contains("GET http://127.0.0.1:9/users"));
    }
}
