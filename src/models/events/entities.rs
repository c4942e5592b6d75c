use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_EVENT_STATUS: &str = "À venir";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../mobile/src/types/generated/event.ts")]
pub struct Event {
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub organizer: String,
    pub status: String,
}

impl Default for Event {
    // 默认持续两小时
    fn default() -> Self {
        let start = Utc::now();
        Self {
            title: String::new(),
            event_type: String::new(),
            start_date: start,
            end_date: start + Duration::hours(2),
            location: String::new(),
            description: String::new(),
            organizer: String::new(),
            status: DEFAULT_EVENT_STATUS.to_string(),
        }
    }
}
