use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../mobile/src/types/generated/course.ts")]
pub struct Course {
    pub title: String,
    pub code: String,
    pub credits: i32,
    /// 授课教师姓名
    pub instructor: String,
    pub department: String,
    pub semester: String,
    pub description: String,
}
