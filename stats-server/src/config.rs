use eyre::WrapErr;
use models::config::{DashboardClock, WebhookConfig};

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) port: u16,
    pub(crate) webhook: WebhookConfig,
    pub(crate) clock: DashboardClock,
}

impl Config {
    pub(crate) fn from_env() -> eyre::Result<Self> {
        let port = std::env::var("STATS_PORT")
            .unwrap_or_else(|_| "3002".to_string())
            .parse::<u16>()
            .wrap_err("STATS_PORT must be a valid u16")?;
        let webhook = WebhookConfig::from_env().wrap_err("load webhook config")?;
        let clock = DashboardClock::from_env()?;

        Ok(Self {
            port,
            webhook,
            clock,
        })
    }
}
