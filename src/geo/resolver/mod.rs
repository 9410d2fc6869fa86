use std::time::Duration;

use log::debug;
use serde::Deserialize;

use crate::geo::{AddressRecord, Coordinate, Resolution};
use crate::geo::municipality::extract_municipality;
use crate::geo::resolver::error::ResolutionError;

pub mod error;

/// GSI (国土地理院) reverse geocoder
pub const DEFAULT_ENDPOINT: &str = "https://mreversegeocoder.gsi.go.jp/reverse-geocoder/LonLatToAddress";
const USER_AGENT: &str = concat!("municipality-locator/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct RemoteResponse {
    results: Option<RemoteResults>
}

#[derive(Debug, Deserialize)]
struct RemoteResults {
    #[serde(rename = "lv01Nm")]
    full_address: String,
    #[serde(rename = "muniCd")]
    municipality_code: String
}

pub struct AddressResolver {
    client: reqwest::Client,
    endpoint: String
}

impl AddressResolver {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ResolutionError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(AddressResolver { client, endpoint: endpoint.to_owned() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Looks up the address at `coordinate` with a single request.
    ///
    /// A response without `results` is a valid answer and comes back as
    /// [`Resolution::NoMatch`]. Network failures, non-2xx statuses and
    /// undecodable bodies all end up as [`ResolutionError::Transport`].
    pub async fn resolve(&self, coordinate: Coordinate) -> Result<Resolution, ResolutionError> {
        // Coordinates go out exactly as acquired, no rounding
        let url = format!(
            "{}?lat={}&lon={}",
            self.endpoint,
            coordinate.latitude,
            coordinate.longitude
        );
        debug!("Querying reverse geocoder at {}", url);

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ResolutionError::status(status.as_u16()));
        }

        let bytes = resp.bytes().await?;
        read_resolution(&bytes)
    }
}

fn read_resolution(body: &[u8]) -> Result<Resolution, ResolutionError> {
    let response: RemoteResponse = serde_json::from_slice(body)?;

    match response.results {
        Some(results) => {
            let municipality_name = extract_municipality(&results.full_address);
            Ok(Resolution::Found(AddressRecord {
                full_address: results.full_address,
                municipality_code: results.municipality_code,
                municipality_name
            }))
        },
        None => Ok(Resolution::NoMatch),
    }
}
