use log::{error, info, warn};
use uuid::Uuid;

use crate::display::{
    NO_MATCH_ADDRESS, NOT_EXTRACTED, PLACEHOLDER, PresentationSink,
    STATUS_ACQUIRING, STATUS_FAILED, STATUS_RESOLVED, STATUS_RESOLVING, STATUS_UNSUPPORTED,
};
use crate::geo::Resolution;
use crate::geo::position::PositionSource;
use crate::geo::resolver::AddressResolver;

/// Runs one lookup cycle: acquire a position, resolve it, render the result.
///
/// Failures never escape, each one ends the cycle with every field of `sink`
/// set to a defined value.
pub async fn run_lookup<P, S>(
    source: &P,
    resolver: &AddressResolver,
    sink: &mut S
) where
    P: PositionSource,
    S: PresentationSink,
{
    let request_id = Uuid::new_v4();
    sink.begin(request_id);
    sink.set_status(STATUS_ACQUIRING);

    if !source.is_available() {
        info!("[{}] No position source available", request_id);
        reset_all(sink);
        sink.set_status(STATUS_UNSUPPORTED);
        return;
    }

    let coordinate = match source.current_position().await {
        Ok(coordinate) => coordinate,
        Err(err) => {
            warn!("[{}] Could not acquire position: {:?}", request_id, err);
            reset_all(sink);
            sink.set_status(&err.to_string());
            return;
        }
    };

    sink.set_status(STATUS_RESOLVING);
    sink.set_latitude(&coordinate.latitude.to_string());
    sink.set_longitude(&coordinate.longitude.to_string());

    info!(
        "[{}] Resolving address at ({}, {})",
        request_id, coordinate.latitude, coordinate.longitude
    );
    match resolver.resolve(coordinate).await {
        Ok(Resolution::Found(record)) => {
            info!(
                "[{}] Found {} ({}), municipality: {:?}",
                request_id, record.full_address, record.municipality_code, record.municipality_name
            );
            sink.set_address(&record.full_address);
            sink.set_municipality_code(&record.municipality_code);
            sink.set_municipality_name(
                record.municipality_name.as_deref().unwrap_or(NOT_EXTRACTED)
            );
            sink.set_status(STATUS_RESOLVED);
        },
        Ok(Resolution::NoMatch) => {
            info!("[{}] No address at this position", request_id);
            sink.set_address(NO_MATCH_ADDRESS);
            sink.set_municipality_code(PLACEHOLDER);
            sink.set_municipality_name(PLACEHOLDER);
            sink.set_status("");
        },
        Err(err) => {
            error!("[{}] Reverse geocoding at {} failed: {}", request_id, resolver.endpoint(), err);
            sink.set_address(PLACEHOLDER);
            sink.set_municipality_code(PLACEHOLDER);
            sink.set_municipality_name(PLACEHOLDER);
            sink.set_status(STATUS_FAILED);
        },
    }
}

fn reset_all<S: PresentationSink>(sink: &mut S) {
    sink.set_latitude(PLACEHOLDER);
    sink.set_longitude(PLACEHOLDER);
    sink.set_address(PLACEHOLDER);
    sink.set_municipality_code(PLACEHOLDER);
    sink.set_municipality_name(PLACEHOLDER);
}
