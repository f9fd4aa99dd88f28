use minestats_http_client::WebhookClient;
use models::config::DashboardClock;

#[derive(Clone)]
pub struct AppState {
    pub webhook: WebhookClient,
    pub clock: DashboardClock,
}
