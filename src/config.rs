use std::env;
use std::time::Duration;

use dotenv::dotenv;

use crate::geo::resolver::DEFAULT_ENDPOINT;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub geocoder_url: String,
    pub geocoder_timeout: Duration,
    pub log_level: String
}

impl Settings {
    pub fn from_env() -> Settings {
        dotenv().ok();

        let geocoder_timeout = env::var("GEOCODER_TIMEOUT_SECS")
            .map(|secs| secs
                .parse::<u64>()
                .expect("GEOCODER_TIMEOUT_SECS must be an integer")
            )
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Settings {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            geocoder_url: env::var("GEOCODER_URL")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            geocoder_timeout: Duration::from_secs(geocoder_timeout),
            log_level: env::var("LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
        }
    }
}
