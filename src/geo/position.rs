use std::fmt::Formatter;

use serde::Deserialize;

use crate::geo::Coordinate;

// Geolocation API error codes
const PERMISSION_DENIED: u16 = 1;
const POSITION_UNAVAILABLE: u16 = 2;
const TIMEOUT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown
}

impl LocationError {
    pub fn from_code(code: u16) -> Self {
        match code {
            PERMISSION_DENIED => LocationError::PermissionDenied,
            POSITION_UNAVAILABLE => LocationError::PositionUnavailable,
            TIMEOUT => LocationError::Timeout,
            _ => LocationError::Unknown,
        }
    }
}

impl std::fmt::Display for LocationError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let msg = match self {
            LocationError::PermissionDenied => { "位置情報の利用が許可されていません。" },
            LocationError::PositionUnavailable => { "位置情報を取得できませんでした。" },
            LocationError::Timeout => { "位置情報の取得がタイムアウトしました。" },
            LocationError::Unknown => { "原因不明のエラーが発生しました。" },
        };
        write!(f, "{}", msg)
    }
}

impl std::error::Error for LocationError {}

/// Something able to tell where the user currently is.
///
/// A source yields exactly one outcome per call and never retries.
pub trait PositionSource {
    /// `false` when the environment has no way of acquiring a position at all.
    fn is_available(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// Position the client acquired on its side and reported with the lookup request.
#[derive(Debug, Default, Deserialize)]
pub struct ReportedPosition {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub error_code: Option<u16>
}

impl ReportedPosition {
    pub fn located(coordinate: Coordinate) -> Self {
        ReportedPosition {
            lat: Some(coordinate.latitude),
            lon: Some(coordinate.longitude),
            error_code: None
        }
    }

    pub fn failed(code: u16) -> Self {
        ReportedPosition { lat: None, lon: None, error_code: Some(code) }
    }
}

impl PositionSource for ReportedPosition {
    fn is_available(&self) -> bool {
        self.error_code.is_some() || (self.lat.is_some() && self.lon.is_some())
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        if let Some(code) = self.error_code {
            return Err(LocationError::from_code(code));
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)),
            _ => Err(LocationError::PositionUnavailable),
        }
    }
}
