use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PLACEHOLDER: &str = "---";
pub const NO_MATCH_ADDRESS: &str = "該当する住所が見つかりませんでした。";
pub const NOT_EXTRACTED: &str = "抽出できませんでした";

pub const STATUS_ACQUIRING: &str = "現在地の座標を取得中です...";
pub const STATUS_UNSUPPORTED: &str = "お使いの環境は位置情報取得に対応していません。";
pub const STATUS_RESOLVING: &str = "座標の取得に成功しました。住所を検索中です...";
pub const STATUS_RESOLVED: &str = "住所の取得が完了しました。";
pub const STATUS_FAILED: &str = "住所の取得に失敗しました。";

/// Receives the text updates of a lookup cycle.
///
/// Every field is set independently. A cycle writes all six fields before it
/// ends, whatever the outcome.
pub trait PresentationSink {
    fn begin(&mut self, _request_id: Uuid) {}
    fn set_latitude(&mut self, text: &str);
    fn set_longitude(&mut self, text: &str);
    fn set_address(&mut self, text: &str);
    fn set_municipality_code(&mut self, text: &str);
    fn set_municipality_name(&mut self, text: &str);
    fn set_status(&mut self, text: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    pub request_id: Option<Uuid>,
    pub latitude: String,
    pub longitude: String,
    pub address: String,
    pub municipality_code: String,
    pub municipality_name: String,
    pub status: String,
    pub updated_at: Option<DateTime<Utc>>
}

impl Default for DisplayState {
    fn default() -> Self {
        DisplayState {
            request_id: None,
            latitude: PLACEHOLDER.to_string(),
            longitude: PLACEHOLDER.to_string(),
            address: PLACEHOLDER.to_string(),
            municipality_code: PLACEHOLDER.to_string(),
            municipality_name: PLACEHOLDER.to_string(),
            status: String::new(),
            updated_at: None
        }
    }
}

impl DisplayState {
    fn write(&mut self, field: fn(&mut DisplayState) -> &mut String, text: &str) {
        let target = field(self);
        target.clear();
        target.push_str(text);
        self.updated_at = Some(Utc::now());
    }
}

impl PresentationSink for DisplayState {
    fn begin(&mut self, request_id: Uuid) {
        self.request_id = Some(request_id);
    }

    fn set_latitude(&mut self, text: &str) {
        self.write(|s| &mut s.latitude, text);
    }

    fn set_longitude(&mut self, text: &str) {
        self.write(|s| &mut s.longitude, text);
    }

    fn set_address(&mut self, text: &str) {
        self.write(|s| &mut s.address, text);
    }

    fn set_municipality_code(&mut self, text: &str) {
        self.write(|s| &mut s.municipality_code, text);
    }

    fn set_municipality_name(&mut self, text: &str) {
        self.write(|s| &mut s.municipality_name, text);
    }

    fn set_status(&mut self, text: &str) {
        self.write(|s| &mut s.status, text);
    }
}

/// Display shared by every lookup of the process.
///
/// Concurrent cycles are not ordered, whichever update lands last is shown.
#[derive(Debug, Default)]
pub struct SharedDisplay {
    state: Mutex<DisplayState>
}

impl SharedDisplay {
    pub fn snapshot(&self) -> DisplayState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, DisplayState> {
        // A panicked writer leaves at worst a half-rendered cycle behind
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl PresentationSink for &SharedDisplay {
    fn begin(&mut self, request_id: Uuid) {
        self.lock().begin(request_id);
    }

    fn set_latitude(&mut self, text: &str) {
        self.lock().set_latitude(text);
    }

    fn set_longitude(&mut self, text: &str) {
        self.lock().set_longitude(text);
    }

    fn set_address(&mut self, text: &str) {
        self.lock().set_address(text);
    }

    fn set_municipality_code(&mut self, text: &str) {
        self.lock().set_municipality_code(text);
    }

    fn set_municipality_name(&mut self, text: &str) {
        self.lock().set_municipality_name(text);
    }

    fn set_status(&mut self, text: &str) {
        self.lock().set_status(text);
    }
}

impl <S: PresentationSink + ?Sized> PresentationSink for &mut S {
    fn begin(&mut self, request_id: Uuid) {
        (**self).begin(request_id);
    }

    fn set_latitude(&mut self, text: &str) {
        (**self).set_latitude(text);
    }

    fn set_longitude(&mut self, text: &str) {
        (**self).set_longitude(text);
    }

    fn set_address(&mut self, text: &str) {
        (**self).set_address(text);
    }

    fn set_municipality_code(&mut self, text: &str) {
        (**self).set_municipality_code(text);
    }

    fn set_municipality_name(&mut self, text: &str) {
        (**self).set_municipality_name(text);
    }

    fn set_status(&mut self, text: &str) {
        (**self).set_status(text);
    }
}

// Fan out, every update goes to both sinks
impl <A: PresentationSink, B: PresentationSink> PresentationSink for (A, B) {
    fn begin(&mut self, request_id: Uuid) {
        self.0.begin(request_id);
        self.1.begin(request_id);
    }

    fn set_latitude(&mut self, text: &str) {
        self.0.set_latitude(text);
        self.1.set_latitude(text);
    }

    fn set_longitude(&mut self, text: &str) {
        self.0.set_longitude(text);
        self.1.set_longitude(text);
    }

    fn set_address(&mut self, text: &str) {
        self.0.set_address(text);
        self.1.set_address(text);
    }

    fn set_municipality_code(&mut self, text: &str) {
        self.0.set_municipality_code(text);
        self.1.set_municipality_code(text);
    }

    fn set_municipality_name(&mut self, text: &str) {
        self.0.set_municipality_name(text);
        self.1.set_municipality_name(text);
    }

    fn set_status(&mut self, text: &str) {
        self.0.set_status(text);
        self.1.set_status(text);
    }
}
