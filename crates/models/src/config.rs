use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use eyre::WrapErr;

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl WebhookConfig {
    pub fn from_env() -> eyre::Result<Self> {
        let base_url =
            std::env::var("WEBHOOK_BASE_URL").wrap_err("missing env var: WEBHOOK_BASE_URL")?;
        let timeout_secs = std::env::var("WEBHOOK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".to_string())
            .parse::<u64>()
            .wrap_err("WEBHOOK_TIMEOUT_SECS must be a valid u64")?;

        Ok(Self {
            base_url,
            timeout_secs,
        })
    }
}

/// Timezone in which "today" is evaluated for forecast labels.
#[derive(Debug, Clone, Copy)]
pub struct DashboardClock {
    pub tz: Tz,
}

impl DashboardClock {
    pub fn from_env() -> eyre::Result<Self> {
        let name = std::env::var("DASHBOARD_TZ").unwrap_or_else(|_| "UTC".to_string());
        let tz = name
            .parse::<Tz>()
            .map_err(|e| eyre::eyre!("DASHBOARD_TZ must be an IANA timezone name: {e}"))?;
        Ok(Self { tz })
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}
