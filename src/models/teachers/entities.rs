use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师档案
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../mobile/src/types/generated/teacher.ts")]
pub struct Teacher {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub department: String,
    /// 职称，如 "Professeur" / "Maître de conférences"
    pub title: String,
    pub specialization: String,
    pub bio: String,
    pub photo_url: String,
    pub office_location: String,
    pub office_hours: String,
}
