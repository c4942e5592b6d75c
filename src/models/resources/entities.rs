use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教学资源
//
// course_name / uploaded_by / upload_date 由写入钩子填写，客户端传入的值会被覆盖。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../mobile/src/types/generated/resource.ts")]
pub struct Resource {
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub course_id: String,
    pub course_name: String,
    pub description: String,
    pub file_url: String,
    pub file_type: String,
    pub size: i64,
    pub upload_date: chrono::DateTime<chrono::Utc>,
    pub uploaded_by: String,
}

impl Default for Resource {
    fn default() -> Self {
        Self {
            title: String::new(),
            resource_type: String::new(),
            course_id: String::new(),
            course_name: String::new(),
            description: String::new(),
            file_url: String::new(),
            file_type: String::new(),
            size: 0,
            upload_date: chrono::Utc::now(),
            uploaded_by: String::new(),
        }
    }
}
