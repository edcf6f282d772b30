use crate::airline::IataCode;
use std::time::Duration;

/// Placeholder replaced by the IATA code in a URL template.
pub const IATA_PLACEHOLDER: &str = "{iata}";

/// Build the shared client; every request is bounded by `timeout`.
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(get_user_agent())
        .timeout(timeout)
        .build()
}

/// Fill the URL template for one airline.
pub fn logo_url(template: &str, iata: &IataCode) -> String {
    template.replace(IATA_PLACEHOLDER, iata.as_str())
}

/// Get standard user agent string
pub fn get_user_agent() -> &'static str {
    "LogoFetch/0.1"
}
